//! Frame buffers.
//!
//! A [`Frame`] is a packed RGBA f32 pixel grid, the working format of every
//! keying backend. Sources deliver frames in platform-native layouts
//! (packed 8-bit BGRA from camera capture, biplanar 4:2:0 YCbCr from video
//! decode); intake constructors convert those into the working format once,
//! up front, so per-pixel kernels never see raw sensor/codec bytes.

use crate::error::{Error, Result};
use crate::pixel::Rgba;

/// How interleaved 8-bit source bytes are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Packed 8-bit RGBA.
    Rgba8,
    /// Packed 8-bit BGRA (common camera capture byte order).
    Bgra8,
}

/// A packed RGBA f32 frame buffer.
///
/// Channel values are normalized to [0, 1]. Row-major, no padding:
/// `data[(y * width + x) * 4 ..][..4]` holds pixel `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    data: Vec<f32>,
    width: u32,
    height: u32,
}

/// Channels per pixel in the working format.
pub const CHANNELS: usize = 4;

impl Frame {
    /// Creates a transparent-black frame.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(width, height));
        }
        let len = (width as usize) * (height as usize) * CHANNELS;
        Ok(Self { data: vec![0.0; len], width, height })
    }

    /// Creates a frame filled with a single color.
    pub fn solid(width: u32, height: u32, px: Rgba) -> Result<Self> {
        let mut frame = Self::new(width, height)?;
        for chunk in frame.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&px.to_array());
        }
        Ok(frame)
    }

    /// Wraps existing packed RGBA f32 data.
    pub fn from_rgba_f32(data: Vec<f32>, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(width, height));
        }
        let expected = (width as usize) * (height as usize) * CHANNELS;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch { expected, actual: data.len() });
        }
        Ok(Self { data, width, height })
    }

    /// Converts interleaved 8-bit bytes into the working format.
    pub fn from_bytes(bytes: &[u8], width: u32, height: u32, layout: PixelLayout) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(width, height));
        }
        let expected = (width as usize) * (height as usize) * CHANNELS;
        if bytes.len() != expected {
            return Err(Error::BufferSizeMismatch { expected, actual: bytes.len() });
        }

        let mut data = Vec::with_capacity(expected);
        for px in bytes.chunks_exact(CHANNELS) {
            let (r, g, b, a) = match layout {
                PixelLayout::Rgba8 => (px[0], px[1], px[2], px[3]),
                PixelLayout::Bgra8 => (px[2], px[1], px[0], px[3]),
            };
            data.push(r as f32 / 255.0);
            data.push(g as f32 / 255.0);
            data.push(b as f32 / 255.0);
            data.push(a as f32 / 255.0);
        }
        Ok(Self { data, width, height })
    }

    /// Converts biplanar 4:2:0 YCbCr (NV12, video range, BT.601) into the
    /// working format. `y_plane` is `width * height` luma bytes, `uv_plane`
    /// is interleaved Cb/Cr at half resolution in both axes.
    pub fn from_nv12(y_plane: &[u8], uv_plane: &[u8], width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(width, height));
        }
        let w = width as usize;
        let h = height as usize;
        let expected_y = w * h;
        if y_plane.len() != expected_y {
            return Err(Error::BufferSizeMismatch { expected: expected_y, actual: y_plane.len() });
        }
        let uv_w = w.div_ceil(2);
        let uv_h = h.div_ceil(2);
        let expected_uv = uv_w * uv_h * 2;
        if uv_plane.len() != expected_uv {
            return Err(Error::BufferSizeMismatch { expected: expected_uv, actual: uv_plane.len() });
        }

        let mut data = Vec::with_capacity(expected_y * CHANNELS);
        for y in 0..h {
            for x in 0..w {
                let luma = y_plane[y * w + x];
                let uv_idx = (y / 2) * uv_w * 2 + (x / 2) * 2;
                let cb = uv_plane[uv_idx];
                let cr = uv_plane[uv_idx + 1];

                // Video-range BT.601 to full-range RGB.
                let yf = (luma as f32 - 16.0) / 219.0;
                let cbf = (cb as f32 - 128.0) / 224.0;
                let crf = (cr as f32 - 128.0) / 224.0;

                let r = yf + 1.402 * crf;
                let g = yf - 0.344136 * cbf - 0.714136 * crf;
                let b = yf + 1.772 * cbf;

                data.push(r.clamp(0.0, 1.0));
                data.push(g.clamp(0.0, 1.0));
                data.push(b.clamp(0.0, 1.0));
                data.push(1.0);
            }
        }
        Ok(Self { data, width, height })
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height).
    #[inline]
    pub fn extent(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Flat channel data.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable flat channel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Reads pixel (x, y). Panics if out of bounds, like slice indexing.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = self.offset(x, y);
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Writes pixel (x, y). Panics if out of bounds, like slice indexing.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&px.to_array());
    }

    /// Multiplies color channels by their alpha in place, converting
    /// straight-alpha content to the premultiplied form compositing
    /// expects.
    pub fn premultiply_alpha(&mut self) {
        for px in self.data.chunks_exact_mut(CHANNELS) {
            let a = px[3];
            px[0] *= a;
            px[1] *= a;
            px[2] *= a;
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        ((y as usize) * (self.width as usize) + (x as usize)) * CHANNELS
    }
}
