use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Pointer sensitivities for orbit, pan, and zoom, and click detection.
pub struct NavigationOptions {
    /// Orbit rotation in degrees per pixel of drag.
    #[schemars(title = "Orbit Speed", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub orbit_degrees_per_pixel: f64,
    /// Pan distance in world units per pixel of drag.
    #[schemars(title = "Pan Speed", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub pan_units_per_pixel: f64,
    /// Multiplier applied to the focus distance before the log falloff.
    #[schemars(title = "Zoom Feel", range(min = 0.001, max = 0.2), extend("step" = 0.001))]
    pub zoom_feel: f64,
    /// Lower bound of the zoom speed factor.
    #[schemars(skip)]
    pub min_zoom_scale: f64,
    /// Closest the eye may approach the look-at target.
    #[schemars(skip)]
    pub min_focus_distance: f64,
    /// Largest `|dx| + |dy|` between press and release that still counts
    /// as a click.
    #[schemars(skip)]
    pub click_epsilon: f32,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            orbit_degrees_per_pixel: 0.5,
            pan_units_per_pixel: 0.01,
            zoom_feel: 0.02,
            min_zoom_scale: 0.01,
            min_focus_distance: 1e-3,
            click_epsilon: 0.001,
        }
    }
}
