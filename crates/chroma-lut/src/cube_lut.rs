//! The keying cube LUT.

use chroma_core::HueRange;
use chroma_math::hue_key_alpha;

use crate::{LutError, LutResult};

/// Interpolation method for cube lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest grid point (no interpolation).
    Nearest,
    /// Trilinear interpolation across the 8 surrounding corners.
    #[default]
    Linear,
}

/// A chroma-key color cube.
///
/// Maps input RGB to premultiplied RGBA through an `N x N x N` grid of
/// precomputed values. Immutable once generated; changing the keyed band
/// means rebuilding the whole table.
///
/// # Structure
///
/// - `size^3` entries of `[r*a, g*a, b*a, a]` as f32
/// - Flattened blue-major: blue slowest, then green, then red
/// - Alpha is binary (0 inside the keyed hue band, 1 outside), so the
///   premultiplied channels are either the grid color or zero
#[derive(Debug, Clone, PartialEq)]
pub struct CubeLut {
    data: Vec<[f32; 4]>,
    size: usize,
    interpolation: Interpolation,
}

impl CubeLut {
    /// Grid resolution used when nothing else is asked for.
    pub const DEFAULT_SIZE: usize = 64;

    /// Generates the cube for a keyed hue band.
    ///
    /// Deterministic and pure: the same `(range, size)` always produces a
    /// byte-identical table. Cost is `O(size^3)`; generate once, not per
    /// frame.
    ///
    /// Fails with [`LutError::InvalidSize`] for `size < 2` - a single grid
    /// step cannot be interpolated.
    pub fn generate(range: HueRange, size: usize) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::InvalidSize(format!(
                "cube size must be >= 2, got {size}"
            )));
        }

        let step = (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);

        for b in 0..size {
            let bf = b as f32 / step;
            for g in 0..size {
                let gf = g as f32 / step;
                for r in 0..size {
                    let rf = r as f32 / step;
                    let alpha = hue_key_alpha([rf, gf, bf], &range);
                    data.push([rf * alpha, gf * alpha, bf * alpha, alpha]);
                }
            }
        }

        Ok(Self { data, size, interpolation: Interpolation::default() })
    }

    /// Creates a cube from raw entries.
    ///
    /// Data must be blue-major with exactly `size^3` entries.
    pub fn from_data(data: Vec<[f32; 4]>, size: usize) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::InvalidSize(format!(
                "cube size must be >= 2, got {size}"
            )));
        }
        let expected = size * size * size;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} entries for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self { data, size, interpolation: Interpolation::default() })
    }

    /// Sets the interpolation method.
    pub fn with_interpolation(mut self, interp: Interpolation) -> Self {
        self.interpolation = interp;
        self
    }

    /// Cube size per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// The flattened entries in blue-major order.
    #[inline]
    pub fn data(&self) -> &[[f32; 4]] {
        &self.data
    }

    /// Serializes the table as little-endian f32 bytes in flattening
    /// order, the "flat buffer plus N" form a consuming filter graph
    /// expects alongside [`size`](Self::size).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 16);
        for entry in &self.data {
            for channel in entry {
                bytes.extend_from_slice(&channel.to_le_bytes());
            }
        }
        bytes
    }

    #[inline]
    fn index(&self, r: usize, g: usize, b: usize) -> usize {
        (b * self.size + g) * self.size + r
    }

    #[inline]
    fn get(&self, r: usize, g: usize, b: usize) -> [f32; 4] {
        self.data[self.index(r, g, b)]
    }

    /// Looks up an RGB value, returning premultiplied RGBA.
    ///
    /// Input is clamped to [0, 1].
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 4] {
        match self.interpolation {
            Interpolation::Nearest => self.apply_nearest(rgb),
            Interpolation::Linear => self.apply_trilinear(rgb),
        }
    }

    fn apply_nearest(&self, rgb: [f32; 3]) -> [f32; 4] {
        let n = (self.size - 1) as f32;
        let ri = (rgb[0].clamp(0.0, 1.0) * n).round() as usize;
        let gi = (rgb[1].clamp(0.0, 1.0) * n).round() as usize;
        let bi = (rgb[2].clamp(0.0, 1.0) * n).round() as usize;
        self.get(
            ri.min(self.size - 1),
            gi.min(self.size - 1),
            bi.min(self.size - 1),
        )
    }

    fn apply_trilinear(&self, rgb: [f32; 3]) -> [f32; 4] {
        let n = (self.size - 1) as f32;
        let r = rgb[0].clamp(0.0, 1.0) * n;
        let g = rgb[1].clamp(0.0, 1.0) * n;
        let b = rgb[2].clamp(0.0, 1.0) * n;

        let ri = (r.floor() as usize).min(self.size - 2);
        let gi = (g.floor() as usize).min(self.size - 2);
        let bi = (b.floor() as usize).min(self.size - 2);

        let rf = r - ri as f32;
        let gf = g - gi as f32;
        let bf = b - bi as f32;

        let c000 = self.get(ri, gi, bi);
        let c100 = self.get(ri + 1, gi, bi);
        let c010 = self.get(ri, gi + 1, bi);
        let c110 = self.get(ri + 1, gi + 1, bi);
        let c001 = self.get(ri, gi, bi + 1);
        let c101 = self.get(ri + 1, gi, bi + 1);
        let c011 = self.get(ri, gi + 1, bi + 1);
        let c111 = self.get(ri + 1, gi + 1, bi + 1);

        let mut result = [0.0f32; 4];
        for i in 0..4 {
            let c00 = c000[i] * (1.0 - rf) + c100[i] * rf;
            let c01 = c001[i] * (1.0 - rf) + c101[i] * rf;
            let c10 = c010[i] * (1.0 - rf) + c110[i] * rf;
            let c11 = c011[i] * (1.0 - rf) + c111[i] * rf;

            let c0 = c00 * (1.0 - gf) + c10 * gf;
            let c1 = c01 * (1.0 - gf) + c11 * gf;

            result[i] = c0 * (1.0 - bf) + c1 * bf;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_core::HueRange;

    #[test]
    fn test_size_one_rejected() {
        assert!(CubeLut::generate(HueRange::green(), 1).is_err());
        assert!(CubeLut::generate(HueRange::green(), 0).is_err());
        assert!(CubeLut::generate(HueRange::green(), 2).is_ok());
    }

    #[test]
    fn test_deterministic_generation() {
        let a = CubeLut::generate(HueRange::new(0.3, 0.4), 17).unwrap();
        let b = CubeLut::generate(HueRange::new(0.3, 0.4), 17).unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn test_n2_flattening_sequence() {
        // For size 2 and band [0.3, 0.4] only pure green (hue 1/3) keys
        // out. Blue-major order: black, red, green, yellow, blue,
        // magenta, cyan, white.
        let lut = CubeLut::generate(HueRange::new(0.3, 0.4), 2).unwrap();
        let expected: Vec<[f32; 4]> = vec![
            [0.0, 0.0, 0.0, 1.0], // black (achromatic -> opaque)
            [1.0, 0.0, 0.0, 1.0], // red
            [0.0, 0.0, 0.0, 0.0], // green, keyed: premultiplied to zero
            [1.0, 1.0, 0.0, 1.0], // yellow
            [0.0, 0.0, 1.0, 1.0], // blue
            [1.0, 0.0, 1.0, 1.0], // magenta
            [0.0, 1.0, 1.0, 1.0], // cyan
            [1.0, 1.0, 1.0, 1.0], // white
        ];
        assert_eq!(lut.data(), expected.as_slice());
    }

    #[test]
    fn test_grayscale_never_keyed() {
        let lut = CubeLut::generate(HueRange::new(0.0, 1.0), 9).unwrap();
        for i in 0..9 {
            let v = i as f32 / 8.0;
            let idx = (i * 9 + i) * 9 + i; // diagonal entry (v, v, v)
            assert_eq!(lut.data()[idx][3], 1.0, "gray level {v} must stay opaque");
        }
    }

    #[test]
    fn test_apply_solid_green_keyed_out() {
        let lut = CubeLut::generate(HueRange::new(0.3, 0.4), 64).unwrap();
        let out = lut.apply([0.0, 1.0, 0.0]);
        assert_eq!(out[3], 0.0);
        let out = lut.apply([1.0, 0.0, 0.0]);
        assert_eq!(out, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_nearest_matches_grid_points() {
        let lut = CubeLut::generate(HueRange::green(), 8)
            .unwrap()
            .with_interpolation(Interpolation::Nearest);
        let out = lut.apply([1.0, 1.0, 1.0]);
        assert_eq!(out, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_from_data_size_check() {
        let data = vec![[0.0; 4]; 8];
        assert!(CubeLut::from_data(data.clone(), 2).is_ok());
        assert!(CubeLut::from_data(data, 3).is_err());
    }

    #[test]
    fn test_to_bytes_layout() {
        let lut = CubeLut::generate(HueRange::new(0.3, 0.4), 2).unwrap();
        let bytes = lut.to_bytes();
        assert_eq!(bytes.len(), 8 * 4 * 4);
        // Second entry is red: bytes 16..20 hold 1.0f32 little-endian.
        assert_eq!(&bytes[16..20], &1.0f32.to_le_bytes());
    }
}
