//! The chroma-key parameter model.
//!
//! Two small value objects describe a keying rule instance:
//!
//! - [`KeyParams`] drives the continuous per-pixel rule (weighted score
//!   against a threshold with a smoothing band).
//! - [`HueRange`] drives the binary table-driven rule (a keyed hue
//!   interval).
//!
//! Neither type validates on construction; degenerate values are clamped
//! at consumption time so a live UI control can write freely.

/// Parameters for the continuous (per-pixel kernel) keying rule.
///
/// `weights` selects which axis of color space represents the key color;
/// the per-pixel score is `dot(rgb, weights)`. Scores at or below
/// `threshold` are fully opaque, scores at or above
/// `threshold + smoothing` are fully keyed out, with a smooth transition
/// in between.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyParams {
    /// Per-channel weights of the key score.
    pub weights: [f32; 3],
    /// Score at which keying begins.
    pub threshold: f32,
    /// Width of the opaque-to-transparent transition band.
    pub smoothing: f32,
}

impl KeyParams {
    /// Creates a parameter set.
    pub const fn new(weights: [f32; 3], threshold: f32, smoothing: f32) -> Self {
        Self { weights, threshold, smoothing }
    }

    /// Green-screen defaults: weights (0, 1, 0), threshold 0.43,
    /// smoothing 0.11.
    pub const fn green_screen() -> Self {
        Self::new([0.0, 1.0, 0.0], 0.43, 0.11)
    }

    /// Returns a copy with the threshold replaced.
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns a copy with the smoothing replaced.
    pub const fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Returns a copy with degenerate values clamped: threshold to [0, 1],
    /// smoothing to >= 0. Called on the consumption path, never on write.
    pub fn clamped(&self) -> Self {
        Self {
            weights: self.weights,
            threshold: self.threshold.clamp(0.0, 1.0),
            smoothing: self.smoothing.max(0.0),
        }
    }
}

impl Default for KeyParams {
    fn default() -> Self {
        Self::green_screen()
    }
}

/// The keyed hue interval for the binary (cube LUT) keying rule.
///
/// Hue is normalized to [0, 1). A sample whose hue falls inside
/// `[from, to]` is keyed out entirely. An inverted interval
/// (`from > to`) keys nothing; it is well-defined, never an error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HueRange {
    /// Lower edge of the keyed band.
    pub from: f32,
    /// Upper edge of the keyed band.
    pub to: f32,
}

impl HueRange {
    /// Creates a hue interval.
    pub const fn new(from: f32, to: f32) -> Self {
        Self { from, to }
    }

    /// The green band [0.3, 0.4] used for green-screen footage.
    pub const fn green() -> Self {
        Self::new(0.3, 0.4)
    }

    /// Whether a hue value falls inside the keyed band.
    ///
    /// Edges outside [0, 1] are clamped first, so a band that straddles
    /// the domain edge degrades to its in-domain portion.
    #[inline]
    pub fn contains(&self, hue: f32) -> bool {
        let from = self.from.clamp(0.0, 1.0);
        let to = self.to.clamp(0.0, 1.0);
        hue >= from && hue <= to
    }
}

impl Default for HueRange {
    fn default() -> Self {
        Self::green()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_green_screen_defaults() {
        let p = KeyParams::green_screen();
        assert_eq!(p.weights, [0.0, 1.0, 0.0]);
        assert_eq!(p.threshold, 0.43);
        assert_eq!(p.smoothing, 0.11);
    }

    #[test]
    fn test_clamped_degenerate() {
        let p = KeyParams::new([0.0, 1.0, 0.0], 1.7, -0.3).clamped();
        assert_eq!(p.threshold, 1.0);
        assert_eq!(p.smoothing, 0.0);
    }

    #[test]
    fn test_hue_range_contains() {
        let range = HueRange::green();
        assert!(range.contains(0.3));
        assert!(range.contains(0.35));
        assert!(range.contains(0.4));
        assert!(!range.contains(0.29));
        assert!(!range.contains(0.41));
    }

    #[test]
    fn test_inverted_range_keys_nothing() {
        let range = HueRange::new(0.8, 0.2);
        for i in 0..=10 {
            assert!(!range.contains(i as f32 / 10.0));
        }
    }

    #[test]
    fn test_out_of_domain_range_clamps() {
        let range = HueRange::new(-0.5, 1.5);
        assert!(range.contains(0.0));
        assert!(range.contains(1.0));
    }
}
