//! Click-to-select: resolves a screen point against the render engine and
//! updates the shared selection model.

use glam::{DVec3, Vec2};

use crate::engine::RenderEngine;
use crate::scene::PrimPath;
use crate::selection::SelectionModel;

/// Result of an engine intersection query.
///
/// An empty `path` means nothing was hit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntersectionResult {
    /// Prim under the query point.
    pub path: PrimPath,
    /// World-space hit point.
    pub world_hit_point: DVec3,
    /// World-space surface normal at the hit.
    pub world_hit_normal: DVec3,
}

/// What a pick did to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// Nothing under the cursor; selection cleared.
    Cleared,
    /// Selection replaced by this single path.
    Selected(PrimPath),
}

/// Apply an intersection result to the selection model.
///
/// A miss clears the selection. A hit selects exactly `[path]` and
/// forwards the hit point and normal.
pub fn apply_intersection(
    result: Option<IntersectionResult>,
    model: &mut SelectionModel,
) -> PickOutcome {
    match result {
        Some(hit) if !hit.path.is_empty() => {
            log::debug!("picked {}", hit.path);
            model.set_selection(vec![hit.path.clone()]);
            model.set_hit(hit.world_hit_point, hit.world_hit_normal);
            PickOutcome::Selected(hit.path)
        }
        _ => {
            model.clear_selection();
            PickOutcome::Cleared
        }
    }
}

/// Query `engine` at `point` (viewport pixels) and apply the result.
pub fn pick(
    engine: &mut dyn RenderEngine,
    point: Vec2,
    model: &mut SelectionModel,
) -> PickOutcome {
    apply_intersection(engine.find_intersection(point), model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(path: &str) -> IntersectionResult {
        IntersectionResult {
            path: PrimPath::from(path),
            world_hit_point: DVec3::new(0.0, 0.0, 1.0),
            world_hit_normal: DVec3::Z,
        }
    }

    #[test]
    fn hit_selects_single_path_and_forwards_hit() {
        let mut model = SelectionModel::new();
        model.set_selection(vec![PrimPath::from("/World/A"), PrimPath::from("/World/B")]);

        let outcome = apply_intersection(Some(hit("/World/Sphere")), &mut model);
        assert_eq!(outcome, PickOutcome::Selected(PrimPath::from("/World/Sphere")));
        assert_eq!(model.selection(), &[PrimPath::from("/World/Sphere")]);
        let recorded = model.hit().unwrap();
        assert_eq!(recorded.point, DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(recorded.normal, DVec3::Z);
    }

    #[test]
    fn miss_or_empty_path_clears_selection() {
        let mut model = SelectionModel::new();
        model.set_selection(vec![PrimPath::from("/World/A")]);
        assert_eq!(apply_intersection(None, &mut model), PickOutcome::Cleared);
        assert!(model.selection().is_empty());

        model.set_selection(vec![PrimPath::from("/World/A")]);
        assert_eq!(
            apply_intersection(Some(IntersectionResult::default()), &mut model),
            PickOutcome::Cleared
        );
        assert!(model.selection().is_empty());
        assert!(model.hit().is_none());
    }
}
