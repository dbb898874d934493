//! Converts raw platform events into viewport commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! press position, held buttons, modifier keys) and the key-binding map.
//! It sits between the host UI's events and
//! [`Viewport::execute`](crate::viewport::Viewport::execute).

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use super::mouse::{is_click, PointerState};
use crate::gizmo::{Operation, Space, ToolMode};
use crate::options::{KeybindingOptions, NavigationOptions};
use crate::viewport::ViewportCommand;

/// Converts raw input events into [`ViewportCommand`]s.
///
/// Gestures:
///
/// | input | command |
/// |---|---|
/// | left drag + Alt | orbit |
/// | left drag + Shift | pan |
/// | right drag + Alt | zoom by vertical drag |
/// | scroll wheel | zoom |
/// | left release without drag | pick |
///
/// When several gestures match one move, orbit wins over pan, and pan over
/// drag-zoom.
pub struct InputProcessor {
    pointer: PointerState,
    left_pressed: bool,
    right_pressed: bool,
    alt_pressed: bool,
    shift_pressed: bool,
    click_epsilon: f32,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a processor with the given click tolerance and key bindings.
    #[must_use]
    pub fn new(nav: &NavigationOptions, key_bindings: KeybindingOptions) -> Self {
        Self {
            pointer: PointerState::new(),
            left_pressed: false,
            right_pressed: false,
            alt_pressed: false,
            shift_pressed: false,
            click_epsilon: nav.click_epsilon,
            key_bindings,
        }
    }

    /// Current cursor position in viewport pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.pointer.position()
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn left_pressed(&self) -> bool {
        self.left_pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeybindingOptions {
        &mut self.key_bindings
    }

    /// Release all buttons without click detection, e.g. when the viewport
    /// loses focus mid-drag.
    pub fn release_mouse_state(&mut self) {
        self.left_pressed = false;
        self.right_pressed = false;
        let _ = self.pointer.release();
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewportCommand> {
        self.key_bindings.lookup(key).map(action_command)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewportCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => Some(ViewportCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { alt, shift } => {
                self.alt_pressed = alt;
                self.shift_pressed = shift;
                None
            }
        }
    }

    fn handle_cursor_moved(&mut self, pos: Vec2) -> Option<ViewportCommand> {
        let delta = self.pointer.move_to(pos);
        if delta == Vec2::ZERO {
            return None;
        }

        if self.left_pressed && self.alt_pressed {
            Some(ViewportCommand::Orbit { delta })
        } else if self.left_pressed && self.shift_pressed {
            Some(ViewportCommand::Pan { delta })
        } else if self.right_pressed && self.alt_pressed {
            Some(ViewportCommand::Zoom { delta: delta.y })
        } else {
            None
        }
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ViewportCommand> {
        match button {
            MouseButton::Left if pressed => {
                self.left_pressed = true;
                self.pointer.press();
                None
            }
            MouseButton::Left => {
                self.left_pressed = false;
                let drag = self.pointer.release()?;
                is_click(drag, self.click_epsilon).then(|| ViewportCommand::Pick {
                    point: self.pointer.position(),
                })
            }
            MouseButton::Right => {
                self.right_pressed = pressed;
                None
            }
            MouseButton::Middle => None,
        }
    }
}

/// Convert a bound key action to its command.
fn action_command(action: KeyAction) -> ViewportCommand {
    let local = |operation| ViewportCommand::SetTool(ToolMode::new(operation, Space::Local));
    match action {
        KeyAction::FocusSelection => ViewportCommand::FocusSelection,
        KeyAction::TranslateTool => local(Operation::Translate),
        KeyAction::RotateTool => local(Operation::Rotate),
        KeyAction::ScaleTool => local(Operation::Scale),
        KeyAction::ToggleGrid => ViewportCommand::ToggleGrid,
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(&NavigationOptions::default(), KeybindingOptions::default())
    }
}
