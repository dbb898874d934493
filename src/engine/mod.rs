//! Render engine contract, backend switching, and a CPU null backend.
//!
//! A [`RenderEngine`] renders the scene graph for one viewport; an
//! [`EngineFactory`] enumerates the backend plugins the host offers and
//! constructs engines for them. [`EngineSlot`] owns the live engine and
//! swaps it when the user picks another backend.

/// Host-resident engine that clears to a flat color and ray-casts extents.
pub mod null;
mod slot;

use std::fmt;

use glam::{DMat4, Vec2};
pub use slot::EngineSlot;

use crate::error::ViewportError;
use crate::gpu::HostImage;
use crate::picking::IntersectionResult;
use crate::scene::{PrimPath, SceneGraph};

/// Token naming a render backend plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginId(String);

impl PluginId {
    /// Wrap a plugin token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginId {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// The color output of the last render.
pub enum RenderOutput<'a> {
    /// Pixels already in host memory.
    Host(HostImage<'a>),
    /// A GPU texture that must be copied to the host before presentation.
    Gpu {
        /// Device owning the texture.
        device: &'a wgpu::Device,
        /// Queue to submit the copy on.
        queue: &'a wgpu::Queue,
        /// The color texture. Needs `COPY_SRC` usage.
        texture: &'a wgpu::Texture,
    },
}

/// A render backend driven once per frame by the viewport.
///
/// Call order per frame: the three setters, [`prepare`](Self::prepare),
/// [`render`](Self::render), then [`color_output`](Self::color_output).
/// [`find_intersection`](Self::find_intersection) queries the last
/// rendered frame.
pub trait RenderEngine {
    /// Plugin this engine was created for.
    fn plugin(&self) -> &PluginId;

    /// Human-readable backend name for the viewport label.
    fn display_name(&self) -> String {
        self.plugin().to_string()
    }

    /// Paths to highlight as selected.
    fn set_selection(&mut self, paths: &[PrimPath]);

    /// Output size in pixels.
    fn set_render_size(&mut self, width: u32, height: u32);

    /// World-to-camera and projection matrices.
    fn set_camera_matrices(&mut self, view: DMat4, projection: DMat4);

    /// Sync render state from the scene graph.
    fn prepare(&mut self, scene: &dyn SceneGraph);

    /// Render a frame.
    fn render(&mut self);

    /// Color output of the last render, if any.
    fn color_output(&self) -> Option<RenderOutput<'_>>;

    /// Closest prim under `point` (viewport pixels) in the last frame.
    fn find_intersection(&mut self, point: Vec2) -> Option<IntersectionResult>;
}

/// Enumerates render backend plugins and constructs engines for them.
pub trait EngineFactory {
    /// Available plugins, in menu order.
    fn plugins(&self) -> Vec<PluginId>;

    /// Human-readable name of `plugin`.
    fn display_name(&self, plugin: &PluginId) -> String {
        plugin.to_string()
    }

    /// Plugin used when a viewport is created: the first one offered.
    fn default_plugin(&self) -> Option<PluginId> {
        self.plugins().into_iter().next()
    }

    /// Construct an engine for `plugin`.
    fn create(&self, plugin: &PluginId) -> Result<Box<dyn RenderEngine>, ViewportError>;
}

/// Menu entry for one available backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererEntry {
    /// Plugin token.
    pub plugin: PluginId,
    /// Human-readable name.
    pub name: String,
    /// Whether this is the live backend.
    pub current: bool,
}
