use glam::DMat4;

use super::{Prim, PrimPath};

/// Read access to an external scene graph.
///
/// Implementations return owned snapshots; the viewport never caches them
/// across frames because the source may change underneath it.
pub trait SceneGraph {
    /// Look up the prim at `path`.
    fn prim(&self, path: &PrimPath) -> Option<Prim>;

    /// Every prim path in the scene, in provider order.
    fn prim_paths(&self) -> Vec<PrimPath>;

    /// Paths of all camera prims, in provider order.
    fn camera_paths(&self) -> Vec<PrimPath> {
        self.prim_paths()
            .into_iter()
            .filter(|path| self.prim(path).is_some_and(|prim| prim.is_camera()))
            .collect()
    }
}

/// The overlay the viewport writes transform overrides into.
///
/// Reads through [`SceneGraph`] observe the overrides.
pub trait EditableLayer: SceneGraph {
    /// Current transform of `path`: the override if one was written,
    /// otherwise the authored transform.
    fn xform(&self, path: &PrimPath) -> Option<DMat4>;

    /// Write a transform override for `path`.
    fn set_xform(&mut self, path: &PrimPath, xform: DMat4);
}
