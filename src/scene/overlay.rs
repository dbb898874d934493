use glam::DMat4;
use rustc_hash::FxHashMap;

use super::{EditableLayer, Prim, PrimPath, SceneGraph};

/// Editable transform layer over a source scene.
///
/// Overrides written through [`EditableLayer::set_xform`] shadow the
/// source's authored transforms; the source itself is never modified.
#[derive(Debug, Clone, Default)]
pub struct XformOverlay<S> {
    source: S,
    overrides: FxHashMap<PrimPath, DMat4>,
    write_count: u64,
}

impl<S: SceneGraph> XformOverlay<S> {
    /// Wrap `source` with an empty override set.
    pub fn new(source: S) -> Self {
        Self {
            source,
            overrides: FxHashMap::default(),
            write_count: 0,
        }
    }

    /// The wrapped source scene.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source scene, for edits made outside the
    /// viewport.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The override written for `path`, if any.
    pub fn override_for(&self, path: &PrimPath) -> Option<DMat4> {
        self.overrides.get(path).copied()
    }

    /// Drop the override for `path`. Returns `true` if one existed.
    pub fn clear_override(&mut self, path: &PrimPath) -> bool {
        self.overrides.remove(path).is_some()
    }

    /// Number of `set_xform` calls since construction.
    pub fn write_count(&self) -> u64 {
        self.write_count
    }
}

impl<S: SceneGraph> SceneGraph for XformOverlay<S> {
    fn prim(&self, path: &PrimPath) -> Option<Prim> {
        let mut prim = self.source.prim(path)?;
        if let Some(xform) = self.overrides.get(path) {
            prim.xform = Some(*xform);
        }
        Some(prim)
    }

    fn prim_paths(&self) -> Vec<PrimPath> {
        self.source.prim_paths()
    }
}

impl<S: SceneGraph> EditableLayer for XformOverlay<S> {
    fn xform(&self, path: &PrimPath) -> Option<DMat4> {
        self.overrides
            .get(path)
            .copied()
            .or_else(|| self.source.prim(path).and_then(|prim| prim.xform))
    }

    fn set_xform(&mut self, path: &PrimPath, xform: DMat4) {
        log::debug!("xform override for {path}");
        let _ = self.overrides.insert(path.clone(), xform);
        self.write_count += 1;
    }
}
