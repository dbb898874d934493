//! The viewport's complete interactive vocabulary.
//!
//! Key presses, mouse gestures, and menu picks all become a
//! `ViewportCommand`, passed to
//! [`Viewport::execute`](super::Viewport::execute).

use glam::Vec2;

use crate::engine::PluginId;
use crate::gizmo::ToolMode;
use crate::scene::PrimPath;

/// A discrete or parameterized operation the viewport can perform.
///
/// ```ignore
/// viewport.execute(ViewportCommand::Zoom { delta: 1.0 }, &mut stage, &mut model);
/// viewport.execute(ViewportCommand::ToggleGrid, &mut stage, &mut model);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the eye about the target by `delta` pixels of drag.
    Orbit {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Slide eye and target across the view plane.
    Pan {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Move toward (positive) or away from the target.
    Zoom {
        /// Scroll or vertical drag amount.
        delta: f32,
    },

    /// Frame the first selected prim's extent.
    FocusSelection,

    // ── Selection ───────────────────────────────────────────────────
    /// Select whatever lies under `point`.
    Pick {
        /// Click position in viewport pixels.
        point: Vec2,
    },

    // ── Tools and overlays ──────────────────────────────────────────
    /// Change the transform gizmo mode.
    SetTool(ToolMode),

    /// Show or hide the ground grid.
    ToggleGrid,

    // ── Camera binding ──────────────────────────────────────────────
    /// Look through the camera prim at this path.
    SetActiveCamera(PrimPath),

    /// Detach from any camera prim.
    SetFreeCamera,

    // ── Backend ─────────────────────────────────────────────────────
    /// Replace the render engine with one for this plugin.
    SwitchRenderer(PluginId),
}
