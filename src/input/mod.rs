//! Input handling: event types, drag tracking, and the input processor
//! that converts raw viewport events into viewport commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable keyboard actions.
pub mod keyboard;
/// Cursor tracking and click detection.
pub(crate) mod mouse;
/// Converts raw events into viewport commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
