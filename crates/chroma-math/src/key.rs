//! The chroma-key classification rule.
//!
//! Both keying strategies reduce to one question per color sample: how
//! opaque should this pixel be? The two variants answer it with different
//! decision surfaces and produce visually distinct edge behavior, so they
//! are kept separate rather than unified behind one formula.

use chroma_core::{HueRange, KeyParams};

use crate::hue::hue;
use crate::interp::smoothstep;

/// Binary classification used by the cube LUT path.
///
/// Returns 0.0 when the sample's hue falls inside the keyed band, 1.0
/// otherwise. Achromatic samples have no hue and are always opaque, so
/// grayscale content never keys out.
///
/// # Example
///
/// ```rust
/// use chroma_core::HueRange;
/// use chroma_math::hue_key_alpha;
///
/// let band = HueRange::new(0.3, 0.4);
/// assert_eq!(hue_key_alpha([0.0, 1.0, 0.0], &band), 0.0); // green keyed
/// assert_eq!(hue_key_alpha([1.0, 0.0, 0.0], &band), 1.0); // red kept
/// assert_eq!(hue_key_alpha([0.5, 0.5, 0.5], &band), 1.0); // gray kept
/// ```
#[inline]
pub fn hue_key_alpha(rgb: [f32; 3], range: &HueRange) -> f32 {
    match hue(rgb) {
        Some(h) if range.contains(h) => 0.0,
        _ => 1.0,
    }
}

/// Continuous classification used by the per-pixel compute kernel.
///
/// The score is `dot(rgb, weights)`; alpha falls from exactly 1 at or
/// below `threshold` to exactly 0 at or above `threshold + smoothing`,
/// following a Hermite smoothstep across the band. A high score means the
/// sample matches the key color and is keyed out.
///
/// Degenerate parameters are clamped: with `smoothing <= 0` the band
/// collapses to a hard step at the threshold.
///
/// # Example
///
/// ```rust
/// use chroma_core::KeyParams;
/// use chroma_math::weighted_key_alpha;
///
/// let params = KeyParams::green_screen();
/// assert_eq!(weighted_key_alpha([0.0, 1.0, 0.0], &params), 0.0);
/// assert_eq!(weighted_key_alpha([1.0, 0.0, 0.0], &params), 1.0);
/// ```
#[inline]
pub fn weighted_key_alpha(rgb: [f32; 3], params: &KeyParams) -> f32 {
    let p = params.clamped();
    let score = rgb[0] * p.weights[0] + rgb[1] * p.weights[1] + rgb[2] * p.weights[2];
    1.0 - smoothstep(p.threshold, p.threshold + p.smoothing, score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_band_edges() {
        let band = HueRange::new(0.3, 0.4);
        // Green hue is exactly 1/3, inside the band.
        assert_eq!(hue_key_alpha([0.2, 0.9, 0.2], &band), 0.0);
        // Cyan (hue 0.5) and yellow (hue 1/6) fall outside.
        assert_eq!(hue_key_alpha([0.0, 1.0, 1.0], &band), 1.0);
        assert_eq!(hue_key_alpha([1.0, 1.0, 0.0], &band), 1.0);
    }

    #[test]
    fn test_binary_gray_always_opaque() {
        let band = HueRange::new(0.0, 1.0); // keys every defined hue
        for i in 0..=8 {
            let v = i as f32 / 8.0;
            assert_eq!(hue_key_alpha([v, v, v], &band), 1.0);
        }
    }

    #[test]
    fn test_continuous_outside_band_exact() {
        let params = KeyParams::new([0.0, 1.0, 0.0], 0.43, 0.11);
        assert_eq!(weighted_key_alpha([0.0, 0.43, 0.0], &params), 1.0);
        assert_eq!(weighted_key_alpha([0.0, 0.54, 0.0], &params), 0.0);
        assert_eq!(weighted_key_alpha([1.0, 0.0, 0.0], &params), 1.0);
        assert_eq!(weighted_key_alpha([0.0, 1.0, 0.0], &params), 0.0);
    }

    #[test]
    fn test_continuous_no_jumps_in_band() {
        let params = KeyParams::new([0.0, 1.0, 0.0], 0.43, 0.11);
        let mut prev = weighted_key_alpha([0.0, 0.42, 0.0], &params);
        for i in 0..=1200 {
            let g = 0.42 + i as f32 * 1e-4;
            let alpha = weighted_key_alpha([0.0, g, 0.0], &params);
            assert!(alpha <= prev, "alpha must fall monotonically");
            assert!(
                (prev - alpha) < 0.005,
                "discontinuity at score {g}: {prev} -> {alpha}"
            );
            prev = alpha;
        }
    }

    #[test]
    fn test_continuous_collapsed_smoothing() {
        let params = KeyParams::new([0.0, 1.0, 0.0], 0.5, 0.0);
        assert_eq!(weighted_key_alpha([0.0, 0.5, 0.0], &params), 1.0);
        assert_eq!(weighted_key_alpha([0.0, 0.51, 0.0], &params), 0.0);
    }

    #[test]
    fn test_continuous_mixed_weights() {
        // Luma-style weights key bright pixels regardless of hue.
        let params = KeyParams::new([0.33, 0.33, 0.33], 0.8, 0.1);
        assert_eq!(weighted_key_alpha([1.0, 1.0, 1.0], &params), 0.0);
        assert_eq!(weighted_key_alpha([0.2, 0.2, 0.2], &params), 1.0);
    }
}
