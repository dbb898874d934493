//! Scene-graph access: prim paths and schemas, the provider and editable
//! layer traits, an in-memory provider, and the camera/extent bridge the
//! viewport uses to read and write them.

mod bridge;
mod memory;
mod overlay;
mod path;
mod prim;
mod provider;

pub use bridge::{
    pull_active_camera_to_viewport, push_viewport_to_active_camera,
    read_camera, read_extent, try_read_camera, CameraBinding,
};
pub use memory::MemoryScene;
pub use overlay::XformOverlay;
pub use path::PrimPath;
pub use prim::{CameraProjection, CameraSchema, Extent, Prim, PrimType};
pub use provider::{EditableLayer, SceneGraph};
