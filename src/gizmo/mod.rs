//! Gizmo overlay contract and the two gizmo bridges.
//!
//! The transform gizmo and the view cube never share state: each is a
//! function from the current matrix to `Some(new matrix)` when the overlay
//! changed it, and the viewport composes them explicitly.

mod tool;

use glam::{DMat4, Mat4, Vec2};
pub use tool::{Operation, Space, ToolMode};

use crate::options::DisplayOptions;
use crate::ui::Rect;

/// Gap between the top of the viewport and the view cube, in pixels.
const VIEW_CUBE_TOP_MARGIN: f32 = 18.0;

/// Interactive matrix-manipulation overlay supplied by the host.
///
/// Matrices are single precision, column-major, OpenGL clip conventions.
pub trait GizmoOverlay {
    /// Start a frame for the viewport `id` drawing into `rect`.
    fn begin_frame(&mut self, id: u64, rect: Rect);

    /// Let the user drag a translate/rotate/scale handle on `matrix`.
    /// Returns the matrix after this frame's interaction.
    fn manipulate(
        &mut self,
        view: Mat4,
        projection: Mat4,
        tool: ToolMode,
        matrix: Mat4,
    ) -> Mat4;

    /// Draw the view cube at `origin` and return the possibly rotated view.
    fn view_manipulate(
        &mut self,
        view: Mat4,
        distance: f32,
        origin: Vec2,
        size: Vec2,
    ) -> Mat4;

    /// Draw a ground grid of `size` world units under `model`.
    fn draw_grid(&mut self, view: Mat4, projection: Mat4, model: Mat4, size: f32);
}

/// Run the transform gizmo on a prim transform.
///
/// Returns the edited transform, or `None` when the overlay left the
/// single-precision matrix exactly as it was.
pub fn manipulate_transform(
    overlay: &mut dyn GizmoOverlay,
    view: &DMat4,
    projection: &DMat4,
    tool: ToolMode,
    xform: &DMat4,
) -> Option<DMat4> {
    let before = xform.as_mat4();
    let after = overlay.manipulate(view.as_mat4(), projection.as_mat4(), tool, before);
    (after != before).then(|| after.as_dmat4())
}

/// Where the view cube sits and how far its camera orbits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCubePlacement {
    /// Top-left corner in pixels.
    pub origin: Vec2,
    /// Width and height in pixels.
    pub size: Vec2,
    /// Camera distance the cube is drawn at.
    pub distance: f32,
}

impl ViewCubePlacement {
    /// Top-right corner of `rect`, sized by `display`.
    #[must_use]
    pub fn for_rect(rect: &Rect, display: &DisplayOptions) -> Self {
        let edge = display.view_cube_size;
        Self {
            origin: Vec2::new(rect.max.x - edge, rect.min.y + VIEW_CUBE_TOP_MARGIN),
            size: Vec2::splat(edge),
            distance: display.view_cube_distance,
        }
    }
}

/// Run the view cube on the current view matrix.
///
/// Returns the new view matrix when the user rotated the cube.
pub fn manipulate_view_cube(
    overlay: &mut dyn GizmoOverlay,
    view: &DMat4,
    placement: &ViewCubePlacement,
) -> Option<DMat4> {
    let before = view.as_mat4();
    let after = overlay.view_manipulate(
        before,
        placement.distance,
        placement.origin,
        placement.size,
    );
    (after != before).then(|| after.as_dmat4())
}
