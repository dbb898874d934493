//! Two-way sync between the viewport camera and scene-graph camera prims.
//!
//! Reads never fail outward: a missing prim or an undefined schema field is
//! logged and replaced by free-camera defaults (cameras) or skipped
//! (extents, pushes, pulls).

use super::{EditableLayer, Extent, PrimPath, SceneGraph};
use crate::camera::{AuthoredCamera, CameraState};
use crate::error::ViewportError;
use crate::options::CameraOptions;

/// Tolerance when comparing the viewport's matrices with the authored pair.
const MATRIX_EPSILON: f64 = 1e-9;

/// Whether the viewport drives a scene camera or its own free camera.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CameraBinding {
    /// Free camera, not coupled to any prim.
    #[default]
    Free,
    /// Coupled to the camera prim at this path.
    Bound(PrimPath),
}

impl CameraBinding {
    /// Bind to `path`; an empty path means the free camera.
    #[must_use]
    pub fn from_path(path: PrimPath) -> Self {
        if path.is_empty() {
            Self::Free
        } else {
            Self::Bound(path)
        }
    }

    /// Path of the bound camera, if any.
    #[must_use]
    pub fn path(&self) -> Option<&PrimPath> {
        match self {
            Self::Free => None,
            Self::Bound(path) => Some(path),
        }
    }

    /// Whether a camera prim is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

/// Read the camera prim at `path`, reporting why it could not be read.
pub fn try_read_camera<S: SceneGraph + ?Sized>(
    scene: &S,
    path: &PrimPath,
) -> Result<AuthoredCamera, ViewportError> {
    let prim = scene
        .prim(path)
        .ok_or_else(|| ViewportError::MissingPrim(path.clone()))?;
    if !prim.is_camera() {
        return Err(ViewportError::NotACamera(path.clone()));
    }
    let missing = |field| ViewportError::MissingField {
        path: path.clone(),
        field,
    };
    let schema = prim.camera.as_ref().ok_or_else(|| missing("camera"))?;
    let xform = prim.xform.ok_or_else(|| missing("xform"))?;
    AuthoredCamera::from_schema(schema, xform).map_err(missing)
}

/// Read the camera prim at `path`, falling back to the free camera
/// described by `options` when it cannot be read.
pub fn read_camera<S: SceneGraph + ?Sized>(
    scene: &S,
    path: &PrimPath,
    options: &CameraOptions,
) -> AuthoredCamera {
    try_read_camera(scene, path).unwrap_or_else(|e| {
        log::debug!("{e}; using free camera");
        AuthoredCamera::free(options)
    })
}

/// Local-space extent of the prim at `path`, if it has one.
pub fn read_extent<S: SceneGraph + ?Sized>(
    scene: &S,
    path: &PrimPath,
) -> Option<Extent> {
    scene.prim(path).and_then(|prim| prim.extent)
}

/// Write the viewport camera into the bound camera prim.
///
/// The inverse view matrix is written as a transform override only when
/// the viewport's view or projection differs from the pair derived from
/// the camera as currently authored, so repeated pushes without camera
/// motion write once. Returns whether a write happened.
pub fn push_viewport_to_active_camera<L: EditableLayer + ?Sized>(
    binding: &CameraBinding,
    state: &CameraState,
    layer: &mut L,
) -> bool {
    let Some(path) = binding.path() else {
        return false;
    };
    let authored = match try_read_camera(&*layer, path) {
        Ok(cam) => cam,
        Err(e) => {
            log::debug!("skipping camera push: {e}");
            return false;
        }
    };

    let view = state.view_matrix();
    let unchanged = view.abs_diff_eq(authored.view_matrix(), MATRIX_EPSILON)
        && state
            .projection
            .abs_diff_eq(authored.projection_matrix(state.aspect), MATRIX_EPSILON);
    if unchanged {
        return false;
    }

    layer.set_xform(path, view.inverse());
    true
}

/// Re-derive eye and target from the bound camera prim.
///
/// Lets one viewport observe edits another viewport made to the same
/// camera. Returns whether the state was updated.
pub fn pull_active_camera_to_viewport<S: SceneGraph + ?Sized>(
    binding: &CameraBinding,
    scene: &S,
    state: &mut CameraState,
    view_distance: f64,
) -> bool {
    let Some(path) = binding.path() else {
        return false;
    };
    match try_read_camera(scene, path) {
        Ok(cam) => {
            state.set_from_camera_to_world(&cam.transform, view_distance);
            true
        }
        Err(e) => {
            log::debug!("skipping camera pull: {e}");
            false
        }
    }
}
