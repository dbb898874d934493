//! Camera parameters derived from a scene-graph camera prim.

use glam::{DMat4, DVec3};

use super::core::{orthographic, perspective};
use crate::options::CameraOptions;
use crate::scene::{CameraProjection, CameraSchema};

/// Focal length used when synthesizing the free camera.
const FREE_CAMERA_FOCAL_LENGTH: f64 = 50.0;

/// A camera read from the scene graph for the current frame.
///
/// Derived fresh every frame and never cached: the authoring source may
/// change underneath the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoredCamera {
    /// Perspective or orthographic.
    pub projection: CameraProjection,
    /// Horizontal film aperture.
    pub horizontal_aperture: f64,
    /// Vertical film aperture.
    pub vertical_aperture: f64,
    /// Horizontal aperture offset.
    pub horizontal_aperture_offset: f64,
    /// Vertical aperture offset.
    pub vertical_aperture_offset: f64,
    /// Lens focal length, same unit as the apertures.
    pub focal_length: f64,
    /// Near clipping distance.
    pub znear: f64,
    /// Far clipping distance.
    pub zfar: f64,
    /// Camera-to-world transform.
    pub transform: DMat4,
}

impl AuthoredCamera {
    /// The free camera: a perspective lens whose vertical field of view and
    /// clipping range come from `options`, at the world origin.
    #[must_use]
    pub fn free(options: &CameraOptions) -> Self {
        let vertical_aperture =
            2.0 * FREE_CAMERA_FOCAL_LENGTH * (options.fovy.to_radians() * 0.5).tan();
        Self {
            projection: CameraProjection::Perspective,
            horizontal_aperture: vertical_aperture,
            vertical_aperture,
            horizontal_aperture_offset: 0.0,
            vertical_aperture_offset: 0.0,
            focal_length: FREE_CAMERA_FOCAL_LENGTH,
            znear: options.znear,
            zfar: options.zfar,
            transform: DMat4::IDENTITY,
        }
    }

    /// Build from a fully authored schema. Returns the name of the first
    /// undefined field on failure.
    pub(crate) fn from_schema(
        schema: &CameraSchema,
        transform: DMat4,
    ) -> Result<Self, &'static str> {
        let [znear, zfar] = schema.clipping_range.ok_or("clippingRange")?;
        Ok(Self {
            projection: schema.projection.ok_or("projection")?,
            horizontal_aperture: f64::from(
                schema.horizontal_aperture.ok_or("horizontalAperture")?,
            ),
            vertical_aperture: f64::from(
                schema.vertical_aperture.ok_or("verticalAperture")?,
            ),
            horizontal_aperture_offset: f64::from(
                schema
                    .horizontal_aperture_offset
                    .ok_or("horizontalApertureOffset")?,
            ),
            vertical_aperture_offset: f64::from(
                schema
                    .vertical_aperture_offset
                    .ok_or("verticalApertureOffset")?,
            ),
            focal_length: f64::from(schema.focal_length.ok_or("focalLength")?),
            znear: f64::from(znear),
            zfar: f64::from(zfar),
            transform,
        })
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn vertical_fov(&self) -> f64 {
        if self.focal_length <= 0.0 {
            return 0.0;
        }
        (2.0 * (0.5 * self.vertical_aperture / self.focal_length).atan()).to_degrees()
    }

    /// Frustum apex in world space.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.transform.w_axis.truncate()
    }

    /// Unit view direction in world space (the transform's -Z axis).
    #[must_use]
    pub fn forward(&self) -> DVec3 {
        (-self.transform.z_axis.truncate()).normalize_or_zero()
    }

    /// Point `view_distance` units down the view direction.
    #[must_use]
    pub fn look_at_point(&self, view_distance: f64) -> DVec3 {
        self.position() + self.forward() * view_distance
    }

    /// World-to-camera matrix with any scale in the transform removed.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        let up = self.transform.y_axis.truncate().normalize_or_zero();
        DMat4::look_to_rh(self.position(), self.forward(), up)
    }

    /// Projection for a viewport of the given aspect ratio: perspective from
    /// the vertical field of view, or orthographic from the vertical
    /// aperture.
    #[must_use]
    pub fn projection_matrix(&self, aspect: f64) -> DMat4 {
        match self.projection {
            CameraProjection::Perspective => {
                perspective(self.vertical_fov(), aspect, self.znear, self.zfar)
            }
            CameraProjection::Orthographic => {
                orthographic(self.vertical_aperture, aspect, self.znear, self.zfar)
            }
        }
    }
}
