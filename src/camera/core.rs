use glam::{DMat4, DVec3};

/// Free-camera state: eye, look-at target, up vector, and the projection
/// computed for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Eye (camera) position in world space.
    pub eye: DVec3,
    /// Look-at target position.
    pub at: DVec3,
    /// Up direction vector.
    pub up: DVec3,
    /// Projection matrix from the last projection update.
    pub projection: DMat4,
    /// Viewport aspect ratio (width / height) used for `projection`.
    pub aspect: f64,
}

impl CameraState {
    /// Create a camera looking from `eye` at `at` with identity projection.
    #[must_use]
    pub fn new(eye: DVec3, at: DVec3, up: DVec3) -> Self {
        Self {
            eye,
            at,
            up,
            projection: DMat4::IDENTITY,
            aspect: 1.0,
        }
    }

    /// Look-at view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.at, self.up)
    }

    /// Distance from eye to the look-at target.
    #[must_use]
    pub fn focus_distance(&self) -> f64 {
        (self.eye - self.at).length()
    }

    /// Unit vector from eye toward the target.
    #[must_use]
    pub fn forward(&self) -> DVec3 {
        (self.at - self.eye).normalize_or_zero()
    }

    /// Reset eye and target from a camera-to-world matrix, placing the
    /// target `view_distance` units down the matrix's -Z axis.
    ///
    /// If the new view direction is parallel to the current up vector, up
    /// is replaced by the matrix's Y axis.
    pub fn set_from_camera_to_world(&mut self, xform: &DMat4, view_distance: f64) {
        let position = xform.w_axis.truncate();
        let forward = (-xform.z_axis.truncate()).normalize_or_zero();
        if forward == DVec3::ZERO {
            return;
        }
        self.eye = position;
        self.at = position + forward * view_distance.max(f64::EPSILON);
        if forward.cross(self.up).length_squared() < 1e-12 {
            let y = xform.y_axis.truncate().normalize_or_zero();
            if y != DVec3::ZERO {
                self.up = y;
            }
        }
    }
}

/// Perspective projection with OpenGL clip conventions (depth in [-1, 1]),
/// the convention gizmo overlays and scene-graph renderers expect.
#[must_use]
pub fn perspective(fovy_degrees: f64, aspect: f64, znear: f64, zfar: f64) -> DMat4 {
    DMat4::perspective_rh_gl(fovy_degrees.to_radians(), aspect, znear, zfar)
}

/// Orthographic projection of a window `height` units tall, centered on the
/// view axis.
#[must_use]
pub fn orthographic(height: f64, aspect: f64, znear: f64, zfar: f64) -> DMat4 {
    let half_h = height * 0.5;
    let half_w = half_h * aspect;
    DMat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, znear, zfar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_matrix_maps_target_onto_negative_z() {
        let cam = CameraState::new(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO, DVec3::Y);
        let p = cam.view_matrix().transform_point3(DVec3::ZERO);
        assert!(p.abs_diff_eq(DVec3::new(0.0, 0.0, -10.0), 1e-12));
    }

    #[test]
    fn camera_to_world_round_trips_through_view_matrix() {
        let cam = CameraState::new(DVec3::new(5.0, 5.0, 5.0), DVec3::ZERO, DVec3::Y);
        let cam_to_world = cam.view_matrix().inverse();

        let mut rebuilt = CameraState::new(DVec3::ZERO, DVec3::NEG_Z, DVec3::Y);
        rebuilt.set_from_camera_to_world(&cam_to_world, 2.0);

        assert!(rebuilt.eye.abs_diff_eq(cam.eye, 1e-9));
        assert!(rebuilt.forward().abs_diff_eq(cam.forward(), 1e-9));
        assert!((rebuilt.focus_distance() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn top_down_view_replaces_degenerate_up() {
        let top = CameraState::new(DVec3::new(0.0, 10.0, 0.0), DVec3::ZERO, DVec3::Z);
        let mut cam = CameraState::new(DVec3::new(0.0, 0.0, 5.0), DVec3::ZERO, DVec3::Y);
        cam.set_from_camera_to_world(&top.view_matrix().inverse(), 5.0);

        assert!(cam.forward().cross(cam.up).length() > 0.5);
    }

    #[test]
    fn perspective_uses_gl_depth_range() {
        let proj = perspective(90.0, 1.0, 1.0, 100.0);
        let near = proj.project_point3(DVec3::new(0.0, 0.0, -1.0));
        let far = proj.project_point3(DVec3::new(0.0, 0.0, -100.0));
        assert!((near.z + 1.0).abs() < 1e-9);
        assert!((far.z - 1.0).abs() < 1e-9);
    }
}
