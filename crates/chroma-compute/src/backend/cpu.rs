//! CPU backend using rayon for parallelization.

use rayon::prelude::*;

use chroma_core::Frame;
use chroma_core::frame::CHANNELS;
use chroma_lut::CubeLut;
use chroma_math::weighted_key_alpha;

use super::{KernelParams, KeyCompute, check_grid, check_same_extent};
use crate::grid::DispatchGrid;
use crate::ComputeResult;

/// CPU keying backend.
///
/// Parallelizes by destination row; within a row pixels are processed
/// left to right. Every pixel is a pure function of the source and the
/// parameter snapshot, so the split is free of ordering effects.
#[derive(Debug, Default)]
pub struct CpuKernel;

impl CpuKernel {
    /// Creates the CPU backend.
    pub fn new() -> Self {
        Self
    }
}

impl KeyCompute for CpuKernel {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn key_frame(
        &self,
        src: &Frame,
        dst: &mut Frame,
        params: KernelParams,
        grid: &DispatchGrid,
    ) -> ComputeResult<()> {
        check_grid(grid, dst)?;

        let (sw, sh) = src.extent();
        let (dw, _dh) = dst.extent();
        let key_params = params.to_key_params();
        let src_data = src.data();
        let row_len = dw as usize * CHANNELS;

        dst.data_mut()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..dw as usize {
                    let rgba = if (x as u32) < sw && (y as u32) < sh {
                        let si = (y * sw as usize + x) * CHANNELS;
                        [src_data[si], src_data[si + 1], src_data[si + 2], src_data[si + 3]]
                    } else {
                        [0.0; 4]
                    };

                    let alpha =
                        weighted_key_alpha([rgba[0], rgba[1], rgba[2]], &key_params);

                    let di = x * CHANNELS;
                    row[di] = rgba[0];
                    row[di + 1] = rgba[1];
                    row[di + 2] = rgba[2];
                    row[di + 3] = alpha;
                }
            });

        Ok(())
    }

    fn apply_lut(&self, src: &Frame, dst: &mut Frame, lut: &CubeLut) -> ComputeResult<()> {
        check_same_extent(src, dst)?;

        dst.data_mut()
            .par_chunks_mut(CHANNELS)
            .zip(src.data().par_chunks(CHANNELS))
            .for_each(|(out, inp)| {
                let rgba = lut.apply([inp[0], inp[1], inp[2]]);
                out.copy_from_slice(&rgba);
            });

        Ok(())
    }

    fn composite_over(&self, fg: &Frame, bg: &mut Frame) -> ComputeResult<()> {
        check_same_extent(fg, bg)?;

        bg.data_mut()
            .par_chunks_mut(CHANNELS)
            .zip(fg.data().par_chunks(CHANNELS))
            .for_each(|(bg_px, fg_px)| {
                let inv = 1.0 - fg_px[3];
                bg_px[0] = fg_px[0] + bg_px[0] * inv;
                bg_px[1] = fg_px[1] + bg_px[1] * inv;
                bg_px[2] = fg_px[2] + bg_px[2] * inv;
                bg_px[3] = fg_px[3] + bg_px[3] * inv;
            });

        Ok(())
    }
}
