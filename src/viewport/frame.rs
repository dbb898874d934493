use crate::gizmo::GizmoOverlay;
use crate::gpu::Presenter;
use crate::scene::EditableLayer;
use crate::selection::SelectionModel;
use crate::ui::{DrawList, TextureId, ViewportRegion};

/// Everything the host lends the viewport for one frame.
pub struct FrameHost<'a, L: EditableLayer> {
    /// Draw region and focus state.
    pub region: ViewportRegion,
    /// Immediate-mode draw list for the viewport window.
    pub draw: &'a mut dyn DrawList,
    /// Gizmo overlay for this frame.
    pub gizmo: &'a mut dyn GizmoOverlay,
    /// Editable scene layer: read for rendering, written by gizmos.
    pub stage: &'a mut L,
    /// Shared selection model.
    pub model: &'a mut SelectionModel,
    /// Presentation layer for the rendered image.
    pub presenter: &'a mut dyn Presenter,
}

/// What one call to [`Viewport::render_frame`](super::Viewport::render_frame)
/// did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameReport {
    /// The region had no area; nothing else ran.
    pub skipped: bool,
    /// Eye and target were re-read from the bound camera.
    pub pulled_camera: bool,
    /// The texture the rendered image was presented into.
    pub texture: Option<TextureId>,
    /// The transform gizmo wrote a new transform for the selected prim.
    pub transform_written: bool,
    /// The view cube changed the camera.
    pub view_changed: bool,
    /// A camera change was written to the bound camera prim.
    pub camera_pushed: bool,
}

impl FrameReport {
    pub(crate) fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}
