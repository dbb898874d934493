use super::{DisplayTexture, HostBuffer, HostImage, Presenter, TextureReadback};
use crate::engine::RenderOutput;
use crate::error::ViewportError;
use crate::ui::TextureId;

/// Readback and presentation state owned by one viewport.
///
/// Nothing here is shared between viewports. Call
/// [`release`](Self::release) when the viewport is destroyed so the
/// presenter can free the display texture.
#[derive(Debug, Default)]
pub struct FrameResources {
    scratch: HostBuffer,
    readback: TextureReadback,
    display: Option<DisplayTexture>,
}

impl FrameResources {
    /// Empty resources; everything is allocated on first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current display texture.
    #[must_use]
    pub fn display(&self) -> Option<&DisplayTexture> {
        self.display.as_ref()
    }

    /// Allocated size of the host scratch buffer.
    #[must_use]
    pub fn scratch_capacity(&self) -> usize {
        self.scratch.capacity()
    }

    /// Resolve `output` to host pixels and present them.
    ///
    /// GPU output is first copied into the scratch buffer.
    pub fn present_output(
        &mut self,
        presenter: &mut dyn Presenter,
        output: RenderOutput<'_>,
    ) -> Result<TextureId, ViewportError> {
        let image = match output {
            RenderOutput::Host(image) => image,
            RenderOutput::Gpu {
                device,
                queue,
                texture,
            } => self.readback.read(device, queue, texture, &mut self.scratch)?,
        };
        Self::present(&mut self.display, presenter, &image)
    }

    /// Upload `image`, reusing the display texture when its dimensions and
    /// format still match and recreating it otherwise.
    fn present(
        display: &mut Option<DisplayTexture>,
        presenter: &mut dyn Presenter,
        image: &HostImage<'_>,
    ) -> Result<TextureId, ViewportError> {
        if let Some(current) = display.as_ref().filter(|d| d.fits(image)) {
            presenter.update_texture(current.id, image);
            return Ok(current.id);
        }

        if let Some(stale) = display.take() {
            log::debug!(
                "display texture {}x{} -> {}x{}",
                stale.width,
                stale.height,
                image.width,
                image.height
            );
            presenter.remove_texture(stale.id);
        }
        let id = presenter
            .create_texture(image)
            .ok_or(ViewportError::UnsupportedFormat(image.format))?;
        *display = Some(DisplayTexture {
            id,
            width: image.width,
            height: image.height,
            format: image.format,
        });
        Ok(id)
    }

    /// Drop GPU-side state tied to the current device.
    pub fn release_gpu(&mut self) {
        self.readback.release();
    }

    /// Free everything, returning the display texture to `presenter`.
    pub fn release(&mut self, presenter: &mut dyn Presenter) {
        if let Some(display) = self.display.take() {
            presenter.remove_texture(display.id);
        }
        self.readback.release();
        self.scratch.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingPresenter;

    fn image(pixels: &[u8], width: u32, height: u32) -> RenderOutput<'_> {
        RenderOutput::Host(HostImage {
            pixels,
            width,
            height,
            format: wgpu::TextureFormat::Rgba8Unorm,
        })
    }

    #[test]
    fn creates_once_then_updates_in_place() {
        let mut presenter = RecordingPresenter::default();
        let mut resources = FrameResources::new();
        let pixels = vec![0u8; 4 * 4 * 4];

        let first = resources.present_output(&mut presenter, image(&pixels, 4, 4)).unwrap();
        let second = resources.present_output(&mut presenter, image(&pixels, 4, 4)).unwrap();

        assert_eq!(first, second);
        assert_eq!(presenter.created.len(), 1);
        assert_eq!(presenter.updated, vec![first]);
        assert!(presenter.removed.is_empty());
    }

    #[test]
    fn dimension_change_recreates_texture() {
        let mut presenter = RecordingPresenter::default();
        let mut resources = FrameResources::new();
        let pixels = vec![0u8; 8 * 4 * 4];

        let small = resources.present_output(&mut presenter, image(&pixels, 4, 4)).unwrap();
        let wide = resources.present_output(&mut presenter, image(&pixels, 8, 4)).unwrap();

        assert_ne!(small, wide);
        assert_eq!(presenter.removed, vec![small]);
        assert_eq!(resources.display().map(|d| (d.width, d.height)), Some((8, 4)));
    }

    #[test]
    fn release_returns_display_texture() {
        let mut presenter = RecordingPresenter::default();
        let mut resources = FrameResources::new();
        let pixels = vec![0u8; 16];
        let id = resources.present_output(&mut presenter, image(&pixels, 2, 2)).unwrap();

        resources.release(&mut presenter);
        assert_eq!(presenter.removed, vec![id]);
        assert!(resources.display().is_none());
    }

    #[test]
    fn presenter_refusal_is_reported() {
        let mut presenter = RecordingPresenter::refusing();
        let mut resources = FrameResources::new();
        let pixels = vec![0u8; 16];
        assert!(matches!(
            resources.present_output(&mut presenter, image(&pixels, 2, 2)),
            Err(ViewportError::UnsupportedFormat(_))
        ));
        assert!(resources.display().is_none());
    }
}
