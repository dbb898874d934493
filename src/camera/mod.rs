//! Camera system for the viewport.
//!
//! Provides the free look-at camera with orbit, pan, zoom, and focus
//! navigation, plus cameras read from scene-graph camera prims.

/// Cameras derived from scene-graph camera prims.
pub mod authored;
/// Orbit/pan/zoom/focus navigation.
pub mod controller;
/// Core camera state and projection builders.
pub mod core;

pub use authored::AuthoredCamera;
pub use controller::CameraController;
pub use core::{orthographic, perspective, CameraState};
