//! Interpolation utilities.

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
/// For values outside [0, 1], the result is extrapolated.
///
/// # Example
///
/// ```rust
/// use chroma_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Hermite smoothstep interpolation.
///
/// Returns 0 for `x <= edge0`, 1 for `x >= edge1`, and smoothly
/// interpolates between using a cubic polynomial.
///
/// # Formula
///
/// `t * t * (3 - 2 * t)` where `t = (x - edge0) / (edge1 - edge0)`
///
/// A collapsed interval (`edge1 <= edge0`) degrades to a hard step at
/// `edge0`: 0 at or below, 1 above. Never divides by zero.
///
/// # Example
///
/// ```rust
/// use chroma_math::smoothstep;
///
/// assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
/// assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
/// assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
/// ```
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x <= edge0 { 0.0 } else { 1.0 };
    }
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
    }

    #[test]
    fn test_smoothstep_edges_exact() {
        assert_eq!(smoothstep(0.43, 0.54, 0.43), 0.0);
        assert_eq!(smoothstep(0.43, 0.54, 0.54), 1.0);
        assert_eq!(smoothstep(0.43, 0.54, 0.0), 0.0);
        assert_eq!(smoothstep(0.43, 0.54, 1.0), 1.0);
    }

    #[test]
    fn test_smoothstep_midpoint() {
        assert_relative_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        // Hermite curve, not linear: quarter point is below 0.25.
        assert_relative_eq!(smoothstep(0.0, 1.0, 0.25), 0.15625);
    }

    #[test]
    fn test_smoothstep_collapsed_interval() {
        assert_eq!(smoothstep(0.5, 0.5, 0.4), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.5), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.6), 1.0);
        assert_eq!(smoothstep(0.7, 0.2, 0.9), 1.0);
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let mut prev = 0.0;
        for i in 0..=1000 {
            let x = i as f32 / 1000.0;
            let v = smoothstep(0.0, 1.0, x);
            assert!(v >= prev);
            prev = v;
        }
    }
}
