//! GPU-to-host transfer of render output and the per-viewport resources
//! that carry it to the presentation layer.

/// Texture readback into grow-only host and staging buffers.
pub mod readback;
/// Per-viewport scratch, staging, and display-texture state.
pub mod resources;
/// Presentation-layer contract for displayable textures.
pub mod texture;

pub use readback::{HostBuffer, TextureReadback};
pub use resources::FrameResources;
pub use texture::{DisplayTexture, Presenter};

/// A borrowed, tightly packed pixel buffer in host memory.
#[derive(Debug, Clone, Copy)]
pub struct HostImage<'a> {
    /// Row-major pixels, `width * bytes_per_pixel` bytes per row.
    pub pixels: &'a [u8],
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: wgpu::TextureFormat,
}
