// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive 3D viewport controller for scene-graph editors.
//!
//! Vista sits between a host UI, a scene graph, and a pluggable render
//! engine. Each [`viewport::Viewport`] owns a navigable camera, routes mouse
//! and keyboard input to orbit/pan/zoom/focus/pick, keeps its camera in sync
//! with a camera prim in the scene, drives transform and view-cube gizmos,
//! and presents the engine's color output as a texture in the host UI.
//!
//! # Key entry points
//!
//! - [`viewport::Viewport`] - per-window frame orchestrator
//! - [`camera::CameraController`] - orbit/pan/zoom/focus navigation
//! - [`scene`] - scene-graph traits, in-memory scene, and the camera bridge
//! - [`engine::RenderEngine`] - the render backend seam
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Frame flow
//!
//! The host calls [`viewport::Viewport::render_frame`] once per redraw,
//! lending it a [`viewport::FrameHost`] with the draw list, gizmo overlay,
//! editable scene layer, selection model, and texture presenter. Input
//! events go through [`viewport::Viewport::handle_input`] between frames.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gizmo;
pub mod gpu;
pub mod input;
pub mod options;
pub mod picking;
pub mod scene;
pub mod selection;
pub mod ui;
pub mod viewport;

#[cfg(test)]
mod test_support;

pub use error::ViewportError;
