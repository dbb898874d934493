use glam::Vec2;

/// Tracks cursor position and where the primary button went down.
pub(crate) struct PointerState {
    /// Last cursor position, `None` until the first move.
    pub cursor: Option<Vec2>,
    /// Cursor position at the primary-button press.
    press_pos: Option<Vec2>,
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            cursor: None,
            press_pos: None,
        }
    }

    /// Record a cursor move and return the delta from the previous
    /// position (zero for the first move).
    pub fn move_to(&mut self, pos: Vec2) -> Vec2 {
        let delta = self.cursor.map_or(Vec2::ZERO, |last| pos - last);
        self.cursor = Some(pos);
        delta
    }

    /// Current cursor position, or the origin before any move.
    pub fn position(&self) -> Vec2 {
        self.cursor.unwrap_or(Vec2::ZERO)
    }

    /// Remember where the primary button went down.
    pub fn press(&mut self) {
        self.press_pos = Some(self.position());
    }

    /// Forget the press and return the net drag since it.
    pub fn release(&mut self) -> Option<Vec2> {
        self.press_pos.take().map(|start| self.position() - start)
    }
}

/// Whether a press-to-release drag is small enough to count as a click.
///
/// The boundary is inclusive: `|dx| + |dy| == epsilon` is a click.
pub(crate) fn is_click(drag: Vec2, epsilon: f32) -> bool {
    drag.x.abs() + drag.y.abs() <= epsilon
}
