use rustc_hash::FxHashMap;

use super::{Prim, PrimPath, SceneGraph};

/// In-memory scene graph keyed by prim path.
///
/// Keeps insertion order so camera menus list prims the way they were
/// added.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    prims: FxHashMap<PrimPath, Prim>,
    order: Vec<PrimPath>,
}

impl MemoryScene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the prim at `path`. Returns the replaced prim.
    pub fn insert(&mut self, path: impl Into<PrimPath>, prim: Prim) -> Option<Prim> {
        let path = path.into();
        let previous = self.prims.insert(path.clone(), prim);
        if previous.is_none() {
            self.order.push(path);
        }
        previous
    }

    /// Remove the prim at `path`.
    pub fn remove(&mut self, path: &PrimPath) -> Option<Prim> {
        let removed = self.prims.remove(path);
        if removed.is_some() {
            self.order.retain(|p| p != path);
        }
        removed
    }

    /// Mutable access to the prim at `path`.
    pub fn prim_mut(&mut self, path: &PrimPath) -> Option<&mut Prim> {
        self.prims.get_mut(path)
    }

    /// Number of prims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the scene has no prims.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl SceneGraph for MemoryScene {
    fn prim(&self, path: &PrimPath) -> Option<Prim> {
        self.prims.get(path).cloned()
    }

    fn prim_paths(&self) -> Vec<PrimPath> {
        self.order.clone()
    }
}
