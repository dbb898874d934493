//! Host UI contract: the viewport's draw region and the immediate-mode
//! drawing primitives it calls each frame.

use glam::Vec2;

/// Axis-aligned screen rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl Rect {
    /// Rectangle spanning `min` to `max`.
    #[must_use]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle at `min` with the given size.
    #[must_use]
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    /// Width in pixels (may be negative for a collapsed region).
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height in pixels (may be negative for a collapsed region).
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Whole-pixel dimensions, or `None` when either side is non-positive.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        let (w, h) = (self.width().round(), self.height().round());
        (w >= 1.0 && h >= 1.0).then_some((w as u32, h as u32))
    }
}

/// The viewport's slice of the host window for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRegion {
    /// Inner drawing rectangle.
    pub rect: Rect,
    /// Whether the viewport window has input focus.
    pub focused: bool,
}

/// Opaque handle to a texture the presentation layer can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Immediate-mode drawing primitives supplied by the host UI.
///
/// Colors are linear RGBA in `[0, 1]`.
pub trait DrawList {
    /// Filled rectangle with rounded corners.
    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: [f32; 4], rounding: f32);

    /// Single line of text with its top-left corner at `pos`.
    fn add_text(&mut self, pos: Vec2, color: [f32; 4], text: &str);

    /// Size the host font would give `text`.
    fn calc_text_size(&self, text: &str) -> Vec2;

    /// Textured quad from `min` to `max` sampling `uv_min..uv_max`.
    fn add_image(
        &mut self,
        texture: TextureId,
        min: Vec2,
        max: Vec2,
        uv_min: Vec2,
        uv_max: Vec2,
    );
}
