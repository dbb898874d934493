use serde::{Deserialize, Serialize};

/// Viewport actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// focus_selection = "KeyF"
/// translate_tool = "KeyW"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Frame the first selected prim.
    FocusSelection,
    /// Translate gizmo in local space.
    TranslateTool,
    /// Rotate gizmo in local space.
    RotateTool,
    /// Scale gizmo in local space.
    ScaleTool,
    /// Show or hide the ground grid.
    ToggleGrid,
}
