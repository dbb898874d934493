use glam::{DMat4, DVec3};

/// Prim type as reported by the scene-graph provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimType {
    /// Camera prim carrying a [`CameraSchema`].
    Camera,
    /// Renderable geometry.
    Mesh,
    /// Transform-only grouping prim.
    Xform,
    /// Any other provider type, by name.
    Other(String),
}

/// Projection token authored on a camera prim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraProjection {
    /// Pinhole perspective projection.
    #[default]
    Perspective,
    /// Parallel projection.
    Orthographic,
}

/// Camera schema fields as authored. Any field may be undefined.
///
/// Apertures, offsets, and focal length share one unit, so only their
/// ratios matter for perspective cameras.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraSchema {
    /// Projection token.
    pub projection: Option<CameraProjection>,
    /// Horizontal film aperture.
    pub horizontal_aperture: Option<f32>,
    /// Vertical film aperture.
    pub vertical_aperture: Option<f32>,
    /// Horizontal aperture offset.
    pub horizontal_aperture_offset: Option<f32>,
    /// Vertical aperture offset.
    pub vertical_aperture_offset: Option<f32>,
    /// Lens focal length.
    pub focal_length: Option<f32>,
    /// Near and far clipping distances.
    pub clipping_range: Option<[f32; 2]>,
}

/// Axis-aligned bounding range in local or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Extent {
    /// Create an extent from two corners.
    #[must_use]
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Center of the range.
    #[must_use]
    pub fn midpoint(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths of the range.
    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Bounding range of this extent's eight corners after `xform`.
    #[must_use]
    pub fn transformed(&self, xform: &DMat4) -> Self {
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for i in 0..8 {
            let corner = DVec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            let p = xform.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }
}

/// A prim as returned by [`SceneGraph::prim`](super::SceneGraph::prim).
///
/// Every schema is optional: readers treat an absent schema as missing data
/// and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Prim {
    /// Provider type.
    pub prim_type: PrimType,
    /// Local-to-world transform.
    pub xform: Option<DMat4>,
    /// Camera schema, present on camera prims.
    pub camera: Option<CameraSchema>,
    /// Local-space extent.
    pub extent: Option<Extent>,
}

impl Prim {
    /// Create a prim of `prim_type` with no schemas.
    #[must_use]
    pub fn new(prim_type: PrimType) -> Self {
        Self {
            prim_type,
            xform: None,
            camera: None,
            extent: None,
        }
    }

    /// Camera prim with a transform and camera schema.
    #[must_use]
    pub fn camera(xform: DMat4, schema: CameraSchema) -> Self {
        Self {
            xform: Some(xform),
            camera: Some(schema),
            ..Self::new(PrimType::Camera)
        }
    }

    /// Mesh prim with a transform and local extent.
    #[must_use]
    pub fn mesh(xform: DMat4, extent: Extent) -> Self {
        Self {
            xform: Some(xform),
            extent: Some(extent),
            ..Self::new(PrimType::Mesh)
        }
    }

    /// Whether the provider reports this prim as a camera.
    #[must_use]
    pub fn is_camera(&self) -> bool {
        self.prim_type == PrimType::Camera
    }
}
