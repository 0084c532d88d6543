//! Frame normalization.
//!
//! The keying kernel is fed pre-scaled frame data, never raw codec
//! output. Normalization maps a source frame onto the destination surface
//! with a single uniform scale factor, `min(sx, sy)`, so the image fits
//! entirely without distortion. Destination pixels outside the scaled
//! region are transparent black.

use chroma_core::Frame;
use chroma_core::frame::CHANNELS;
use rayon::prelude::*;

/// The uniform aspect-fit scale factor, `min(dst_w/src_w, dst_h/src_h)`.
///
/// Zero when the source is degenerate.
pub fn fit_scale(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> f32 {
    if src_w == 0 || src_h == 0 {
        return 0.0;
    }
    let sx = dst_w as f32 / src_w as f32;
    let sy = dst_h as f32 / src_h as f32;
    sx.min(sy)
}

/// Scales `src` into `dst` with bilinear filtering at the aspect-fit
/// scale, anchored at the origin. Overwrites every destination pixel.
pub fn normalize_into(src: &Frame, dst: &mut Frame) {
    let (sw, sh) = src.extent();
    let (dw, dh) = dst.extent();

    if (sw, sh) == (dw, dh) {
        dst.data_mut().copy_from_slice(src.data());
        return;
    }

    let scale = fit_scale(sw, sh, dw, dh);
    if scale <= 0.0 {
        dst.data_mut().fill(0.0);
        return;
    }

    let out_w = ((sw as f32 * scale).round() as u32).min(dw) as usize;
    let out_h = ((sh as f32 * scale).round() as u32).min(dh) as usize;
    let inv = 1.0 / scale;
    let src_data = src.data();
    let row_len = dw as usize * CHANNELS;

    dst.data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(dy, row)| {
            if dy >= out_h {
                row.fill(0.0);
                return;
            }
            let fy = dy as f32 * inv;
            let y0 = (fy as usize).min(sh as usize - 1);
            let y1 = (y0 + 1).min(sh as usize - 1);
            let ty = fy - y0 as f32;

            for dx in 0..dw as usize {
                let base = dx * CHANNELS;
                if dx >= out_w {
                    row[base..base + CHANNELS].fill(0.0);
                    continue;
                }
                let fx = dx as f32 * inv;
                let x0 = (fx as usize).min(sw as usize - 1);
                let x1 = (x0 + 1).min(sw as usize - 1);
                let tx = fx - x0 as f32;

                for ch in 0..CHANNELS {
                    let at = |x: usize, y: usize| src_data[(y * sw as usize + x) * CHANNELS + ch];
                    let top = at(x0, y0) + tx * (at(x1, y0) - at(x0, y0));
                    let bot = at(x0, y1) + tx * (at(x1, y1) - at(x0, y1));
                    row[base + ch] = top + ty * (bot - top);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chroma_core::Rgba;

    #[test]
    fn test_fit_scale_picks_smaller_axis() {
        assert_relative_eq!(fit_scale(100, 100, 200, 50), 0.5);
        assert_relative_eq!(fit_scale(100, 100, 50, 200), 0.5);
        assert_relative_eq!(fit_scale(100, 100, 100, 100), 1.0);
        assert_eq!(fit_scale(0, 100, 50, 50), 0.0);
    }

    #[test]
    fn test_same_extent_is_copy() {
        let src = Frame::solid(4, 4, Rgba::new(0.3, 0.6, 0.9, 1.0)).unwrap();
        let mut dst = Frame::new(4, 4).unwrap();
        normalize_into(&src, &mut dst);
        assert_eq!(dst.data(), src.data());
    }

    #[test]
    fn test_solid_downscale_stays_solid() {
        let src = Frame::solid(8, 8, Rgba::new(0.2, 0.8, 0.4, 1.0)).unwrap();
        let mut dst = Frame::new(4, 4).unwrap();
        normalize_into(&src, &mut dst);
        for y in 0..4 {
            for x in 0..4 {
                let px = dst.pixel(x, y);
                assert_relative_eq!(px.g, 0.8, epsilon = 1e-5);
                assert_relative_eq!(px.a, 1.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_letterboxed_region_transparent() {
        // 4x4 into 8x4: scale = min(2, 1) = 1, so the image occupies the
        // left 4 columns and the rest is transparent.
        let src = Frame::solid(4, 4, Rgba::new(1.0, 0.0, 0.0, 1.0)).unwrap();
        let mut dst = Frame::new(8, 4).unwrap();
        normalize_into(&src, &mut dst);
        assert_eq!(dst.pixel(2, 2), Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(dst.pixel(6, 2), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_overwrites_stale_destination() {
        let src = Frame::solid(4, 4, Rgba::new(0.0, 0.0, 0.0, 0.0)).unwrap();
        let mut dst = Frame::solid(8, 4, Rgba::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        normalize_into(&src, &mut dst);
        assert_eq!(dst.pixel(0, 0), Rgba::TRANSPARENT);
        assert_eq!(dst.pixel(7, 3), Rgba::TRANSPARENT);
    }
}
