use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Overlay toggles drawn on top of the rendered image.
pub struct DisplayOptions {
    /// Draw the ground grid.
    #[schemars(title = "Show Grid")]
    pub show_grid: bool,
    /// Grid extent in world units.
    #[schemars(title = "Grid Size", range(min = 1.0, max = 1000.0), extend("step" = 1.0))]
    pub grid_size: f32,
    /// Draw the active renderer's name in the top-right corner.
    #[schemars(title = "Show Renderer")]
    pub show_renderer_label: bool,
    /// Edge length of the view cube in pixels.
    #[schemars(skip)]
    pub view_cube_size: f32,
    /// Camera distance the view cube orbits at.
    #[schemars(skip)]
    pub view_cube_distance: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_size: 10.0,
            show_renderer_label: true,
            view_cube_size: 128.0,
            view_cube_distance: 8.0,
        }
    }
}
