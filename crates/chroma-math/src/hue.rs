//! Hue derivation from RGB.

/// Derives the hue of an RGB sample, normalized to [0, 1).
///
/// Standard max-channel derivation: the dominant channel selects the
/// sextant, the two remaining channels position the hue within it.
///
/// Returns `None` for achromatic input (all channels equal): gray has no
/// hue, and callers decide the policy for it rather than receiving an
/// arbitrary angle.
///
/// # Example
///
/// ```rust
/// use chroma_math::hue;
///
/// assert_eq!(hue([1.0, 0.0, 0.0]), Some(0.0));       // red
/// assert_eq!(hue([0.0, 1.0, 0.0]), Some(1.0 / 3.0)); // green
/// assert_eq!(hue([0.5, 0.5, 0.5]), None);            // gray
/// ```
pub fn hue(rgb: [f32; 3]) -> Option<f32> {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta <= f32::EPSILON {
        return None;
    }

    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Some(h / 6.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_primaries() {
        assert_relative_eq!(hue([1.0, 0.0, 0.0]).unwrap(), 0.0);
        assert_relative_eq!(hue([0.0, 1.0, 0.0]).unwrap(), 1.0 / 3.0);
        assert_relative_eq!(hue([0.0, 0.0, 1.0]).unwrap(), 2.0 / 3.0);
    }

    #[test]
    fn test_secondaries() {
        assert_relative_eq!(hue([1.0, 1.0, 0.0]).unwrap(), 1.0 / 6.0); // yellow
        assert_relative_eq!(hue([0.0, 1.0, 1.0]).unwrap(), 0.5); // cyan
        assert_relative_eq!(hue([1.0, 0.0, 1.0]).unwrap(), 5.0 / 6.0); // magenta
    }

    #[test]
    fn test_achromatic_has_no_hue() {
        assert_eq!(hue([0.0, 0.0, 0.0]), None);
        assert_eq!(hue([0.5, 0.5, 0.5]), None);
        assert_eq!(hue([1.0, 1.0, 1.0]), None);
    }

    #[test]
    fn test_wraparound_stays_in_domain() {
        // Reddish with more blue than green lands just below 1.0,
        // never negative.
        let h = hue([1.0, 0.0, 0.1]).unwrap();
        assert!(h > 0.9 && h < 1.0);
    }

    #[test]
    fn test_desaturated_green_still_green() {
        let h = hue([0.4, 0.8, 0.4]).unwrap();
        assert_relative_eq!(h, 1.0 / 3.0);
    }
}
