//! Presentation-layer contract: turns host pixel buffers into textures the
//! host UI can draw.

use super::HostImage;
use crate::ui::TextureId;

/// Creates, updates, and removes displayable textures.
pub trait Presenter {
    /// Upload `image` into a new texture. `None` if the layer cannot create
    /// one for this format.
    fn create_texture(&mut self, image: &HostImage<'_>) -> Option<TextureId>;

    /// Overwrite an existing texture of the same size and format in place.
    fn update_texture(&mut self, id: TextureId, image: &HostImage<'_>);

    /// Free a texture.
    fn remove_texture(&mut self, id: TextureId);
}

/// A texture created by the [`Presenter`], keyed by its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTexture {
    /// Presenter handle.
    pub id: TextureId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: wgpu::TextureFormat,
}

impl DisplayTexture {
    /// Whether `image` can be uploaded into this texture in place.
    #[must_use]
    pub fn fits(&self, image: &HostImage<'_>) -> bool {
        self.width == image.width && self.height == image.height && self.format == image.format
    }
}
