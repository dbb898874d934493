//! Shared selection model the viewport reads and writes.

use glam::DVec3;

use crate::scene::PrimPath;

/// World-space hit data from the last successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Hit point.
    pub point: DVec3,
    /// Surface normal at the hit point.
    pub normal: DVec3,
}

/// Selection state shared between the viewport and the rest of the editor.
///
/// Only the first selected path drives the transform gizmo. Downstream
/// tools (e.g. snapping) read the last hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionModel {
    selection: Vec<PrimPath>,
    hit: Option<Hit>,
    active_camera: Option<PrimPath>,
}

impl SelectionModel {
    /// Empty selection, no hit, free camera.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected paths in selection order.
    #[must_use]
    pub fn selection(&self) -> &[PrimPath] {
        &self.selection
    }

    /// Replace the selection.
    pub fn set_selection(&mut self, paths: Vec<PrimPath>) {
        self.selection = paths;
    }

    /// Clear the selection. The last hit is kept.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The path the transform gizmo edits: the first selected, non-empty
    /// path.
    #[must_use]
    pub fn primary(&self) -> Option<&PrimPath> {
        self.selection.first().filter(|path| !path.is_empty())
    }

    /// Last pick hit.
    #[must_use]
    pub fn hit(&self) -> Option<Hit> {
        self.hit
    }

    /// Record a pick hit.
    pub fn set_hit(&mut self, point: DVec3, normal: DVec3) {
        self.hit = Some(Hit { point, normal });
    }

    /// Camera prim the viewport is looking through, `None` for the free
    /// camera.
    #[must_use]
    pub fn active_camera(&self) -> Option<&PrimPath> {
        self.active_camera.as_ref()
    }

    /// Publish the viewport's active camera.
    pub fn set_active_camera(&mut self, path: Option<PrimPath>) {
        self.active_camera = path;
    }
}
