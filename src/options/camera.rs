use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Free-camera projection and initial placement.
pub struct CameraOptions {
    /// Vertical field of view in degrees when no scene camera is bound.
    #[schemars(title = "Field of View", range(min = 10.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f64,
    /// Near clipping plane distance for the free camera.
    #[schemars(title = "Near Clip", range(min = 0.001, max = 10.0))]
    pub znear: f64,
    /// Far clipping plane distance for the free camera.
    #[schemars(title = "Far Clip", range(min = 10.0, max = 1_000_000.0))]
    pub zfar: f64,
    /// Initial eye position.
    #[schemars(skip)]
    pub eye: [f64; 3],
    /// Initial look-at target.
    #[schemars(skip)]
    pub target: [f64; 3],
    /// Up direction.
    #[schemars(skip)]
    pub up: [f64; 3],
    /// Distance down the view axis at which the look-at target is placed
    /// when eye and target are rebuilt from a camera transform.
    #[schemars(skip)]
    pub view_distance: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 10000.0,
            eye: [5.0, 5.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            view_distance: 5.0,
        }
    }
}
