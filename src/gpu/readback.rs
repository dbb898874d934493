//! Synchronous GPU texture readback.
//!
//! The copy is submitted and waited on within the same frame: the render
//! step stalls until the pixels are in host memory.

use super::HostImage;
use crate::error::ViewportError;

/// Host-side pixel storage reused across frames.
///
/// Grows to fit the largest frame seen and never shrinks, so steady-state
/// frames do not allocate.
#[derive(Debug, Default)]
pub struct HostBuffer {
    bytes: Vec<u8>,
    len: usize,
}

impl HostBuffer {
    /// Empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize the visible region to `len` bytes, growing the allocation if
    /// needed, and return it.
    pub fn prepare(&mut self, len: usize) -> &mut [u8] {
        if self.bytes.len() < len {
            log::debug!("growing readback buffer to {len} bytes");
            self.bytes.resize(len, 0);
        }
        self.len = len;
        &mut self.bytes[..len]
    }

    /// The bytes of the last frame.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Allocated size in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Free the allocation.
    pub fn release(&mut self) {
        self.bytes = Vec::new();
        self.len = 0;
    }
}

/// Copies render-output textures into a [`HostBuffer`].
///
/// Holds one `MAP_READ` staging buffer that grows 2x when a larger frame
/// arrives and is otherwise reused.
#[derive(Debug, Default)]
pub struct TextureReadback {
    staging: Option<wgpu::Buffer>,
}

impl TextureReadback {
    /// Readback with no staging buffer yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the current staging buffer in bytes.
    #[must_use]
    pub fn staging_size(&self) -> u64 {
        self.staging.as_ref().map_or(0, wgpu::Buffer::size)
    }

    /// Drop the staging buffer, e.g. when the device changes.
    pub fn release(&mut self) {
        self.staging = None;
    }

    /// Copy mip 0 of `texture` into `out` and wait for completion.
    pub fn read<'a>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture: &wgpu::Texture,
        out: &'a mut HostBuffer,
    ) -> Result<HostImage<'a>, ViewportError> {
        let format = texture.format();
        if !texture.usage().contains(wgpu::TextureUsages::COPY_SRC) {
            return Err(ViewportError::Readback(
                "render output texture lacks COPY_SRC usage".into(),
            ));
        }
        let bytes_per_pixel = format
            .block_copy_size(None)
            .ok_or(ViewportError::UnsupportedFormat(format))?;

        let size = texture.size();
        let (width, height) = (size.width, size.height);
        if width == 0 || height == 0 {
            return Err(ViewportError::Readback("render output is empty".into()));
        }
        let unpadded = width * bytes_per_pixel;
        let padded = padded_bytes_per_row(unpadded);
        let staging_len = u64::from(padded) * u64::from(height);

        self.ensure_staging(device, staging_len);
        let staging = self
            .staging
            .as_ref()
            .ok_or_else(|| ViewportError::Readback("no staging buffer".into()))?;

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Readback Encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let submission = queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..staging_len);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = device
            .poll(wgpu::PollType::WaitForSubmissionIndex(submission))
            .map_err(|e| ViewportError::Readback(e.to_string()))?;

        match receiver.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(ViewportError::Readback(e.to_string())),
            Err(e) => return Err(ViewportError::Readback(e.to_string())),
        }

        let dst = out.prepare(unpadded as usize * height as usize);
        {
            let mapped = slice.get_mapped_range();
            unpad_rows(&mapped, padded as usize, unpadded as usize, dst);
        }
        staging.unmap();

        Ok(HostImage {
            pixels: out.as_slice(),
            width,
            height,
            format,
        })
    }

    /// Reallocate the staging buffer when it cannot hold `len` bytes.
    fn ensure_staging(&mut self, device: &wgpu::Device, len: u64) {
        let Some(size) = next_staging_size(self.staging_size(), len) else {
            return;
        };
        log::debug!("allocating {size} byte readback staging buffer");
        self.staging = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Staging"),
            size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        }));
    }
}

/// New staging size for a `needed`-byte copy, or `None` if `current`
/// already fits. Grows to twice the current size, or to `needed` if larger.
pub(crate) fn next_staging_size(current: u64, needed: u64) -> Option<u64> {
    (current < needed).then(|| needed.max(current * 2))
}

/// Row pitch rounded up to wgpu's copy alignment.
pub(crate) fn padded_bytes_per_row(unpadded: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Copy rows of `unpadded` bytes out of a buffer with `padded` row pitch.
pub(crate) fn unpad_rows(src: &[u8], padded: usize, unpadded: usize, dst: &mut [u8]) {
    for (dst_row, src_row) in dst.chunks_exact_mut(unpadded).zip(src.chunks(padded)) {
        dst_row.copy_from_slice(&src_row[..unpadded]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_pad_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(4), 256);
        assert_eq!(padded_bytes_per_row(256), 256);
        assert_eq!(padded_bytes_per_row(800 * 4), 3328);
    }

    #[test]
    fn staging_doubles_and_never_shrinks() {
        assert_eq!(next_staging_size(0, 1000), Some(1000));
        assert_eq!(next_staging_size(1000, 1000), None);
        assert_eq!(next_staging_size(1000, 10), None);
        assert_eq!(next_staging_size(1000, 1200), Some(2000));
        assert_eq!(next_staging_size(1000, 5000), Some(5000));
    }

    #[test]
    fn unpad_drops_row_padding() {
        // Two rows of 3 bytes each, padded to 8.
        let src = [1, 2, 3, 0, 0, 0, 0, 0, 4, 5, 6, 0, 0, 0, 0, 0];
        let mut dst = [0u8; 6];
        unpad_rows(&src, 8, 3, &mut dst);
        assert_eq!(dst, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn host_buffer_grows_but_never_shrinks() {
        let mut buf = HostBuffer::new();
        assert_eq!(buf.prepare(64).len(), 64);
        assert_eq!(buf.prepare(16).len(), 16);
        assert_eq!(buf.capacity(), 64);
        assert_eq!(buf.as_slice().len(), 16);
        let _ = buf.prepare(128);
        assert_eq!(buf.capacity(), 128);
        buf.release();
        assert_eq!(buf.capacity(), 0);
    }
}
