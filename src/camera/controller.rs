use glam::{DQuat, DVec3, Vec2};

use super::core::CameraState;
use crate::options::NavigationOptions;
use crate::scene::Extent;

/// Offsets whose squared cross product with `up` falls below this fraction
/// of their squared length count as parallel to `up`.
const PARALLEL_GUARD: f64 = 1e-10;

/// Orbit/pan/zoom navigation around a look-at target.
///
/// Every mutator keeps `eye` and `at` apart and `eye - at` off the up axis.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Camera being driven.
    pub state: CameraState,
    nav: NavigationOptions,
}

impl CameraController {
    /// Create a controller for `state` with the given sensitivities.
    #[must_use]
    pub fn new(state: CameraState, nav: NavigationOptions) -> Self {
        Self { state, nav }
    }

    /// Navigation sensitivities in use.
    #[must_use]
    pub fn navigation(&self) -> &NavigationOptions {
        &self.nav
    }

    /// Replace the navigation sensitivities.
    pub fn set_navigation(&mut self, nav: NavigationOptions) {
        self.nav = nav;
    }

    /// Rotate the eye about the target.
    ///
    /// Horizontal delta turns about `up`, then vertical delta tilts about
    /// the right vector recomputed after the first turn. The two rotations
    /// are applied one after the other so no roll accumulates. A tilt that
    /// would line the view up with `up` is dropped.
    pub fn orbit(&mut self, delta: Vec2) {
        let degrees_per_pixel = self.nav.orbit_degrees_per_pixel;
        let cam = &mut self.state;
        let up = cam.up.normalize_or_zero();
        if up == DVec3::ZERO {
            return;
        }

        let turn = DQuat::from_axis_angle(
            up,
            -(f64::from(delta.x) * degrees_per_pixel).to_radians(),
        );
        let offset = turn * (cam.eye - cam.at);
        cam.eye = cam.at + offset;

        let right = (-offset).cross(up).normalize_or_zero();
        if right == DVec3::ZERO {
            return;
        }
        let tilt = DQuat::from_axis_angle(
            right,
            -(f64::from(delta.y) * degrees_per_pixel).to_radians(),
        );
        let tilted = tilt * offset;
        if tilted.cross(up).length_squared() > PARALLEL_GUARD * tilted.length_squared() {
            cam.eye = cam.at + tilted;
        }
    }

    /// Slide eye and target together across the view plane.
    pub fn pan(&mut self, delta: Vec2) {
        let units_per_pixel = self.nav.pan_units_per_pixel;
        let cam = &mut self.state;
        let front = cam.at - cam.eye;
        let right = front.cross(cam.up).normalize_or_zero();
        let cam_up = right.cross(front).normalize_or_zero();

        let shift = right * (-f64::from(delta.x) * units_per_pixel)
            + cam_up * (f64::from(delta.y) * units_per_pixel);
        cam.eye += shift;
        cam.at += shift;
    }

    /// Zoom speed factor at `focus_distance`:
    /// `max(min_zoom_scale, ln(focus_distance * zoom_feel))`.
    ///
    /// Monotonically non-decreasing in distance and never below the floor.
    #[must_use]
    pub fn zoom_scale(&self, focus_distance: f64) -> f64 {
        (focus_distance * self.nav.zoom_feel)
            .ln()
            .max(self.nav.min_zoom_scale)
    }

    /// Move the eye toward (positive `delta`) or away from the target.
    ///
    /// The eye stops `min_focus_distance` short of the target.
    pub fn zoom(&mut self, delta: f64) {
        let distance = self.state.focus_distance();
        let forward = self.state.forward();
        if forward == DVec3::ZERO {
            return;
        }
        let headroom = (distance - self.nav.min_focus_distance).max(0.0);
        let step = (delta * self.zoom_scale(distance)).min(headroom);
        self.state.eye += forward * step;
    }

    /// Center the target on `extent` and back the eye off along the current
    /// view direction to twice the extent's diagonal.
    pub fn focus_on(&mut self, extent: &Extent) {
        let cam = &mut self.state;
        let back = (cam.eye - cam.at).normalize_or_zero();
        let back = if back == DVec3::ZERO { DVec3::Z } else { back };
        let distance = (extent.size().length() * 2.0).max(self.nav.min_focus_distance);

        cam.at = extent.midpoint();
        cam.eye = cam.at + back * distance;
    }
}
