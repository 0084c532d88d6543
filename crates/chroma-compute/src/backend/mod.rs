//! Keying backends.
//!
//! A backend executes the per-pixel work of one frame tick: the
//! continuous keying kernel, cube LUT application, and compositing. All
//! backends honor the same independence invariant - no pixel's result
//! depends on another's - which is what allows the CPU implementation to
//! parallelize by row and the GPU implementation to dispatch 16x16 tiles.

mod cpu;
#[cfg(feature = "wgpu")]
mod wgpu_backend;

pub use cpu::CpuKernel;
#[cfg(feature = "wgpu")]
pub use wgpu_backend::WgpuKernel;

use chroma_core::{Frame, KeyParams};
use chroma_lut::CubeLut;
use tracing::debug;

use crate::grid::DispatchGrid;
use crate::{ComputeError, ComputeResult};

/// Snapshot of key parameters for one dispatch.
///
/// `#[repr(C)]` and padded to a 16-byte multiple so the same bytes serve
/// as the GPU uniform. Built from [`KeyParams`] with degenerate values
/// already clamped; every backend consumes the snapshot as-is, so the
/// five scalars of one dispatch are always mutually consistent.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct KernelParams {
    /// Per-channel score weights.
    pub weights: [f32; 3],
    /// Score at which keying begins.
    pub threshold: f32,
    /// Transition band width.
    pub smoothing: f32,
    _pad: [f32; 3],
}

impl From<&KeyParams> for KernelParams {
    fn from(params: &KeyParams) -> Self {
        let p = params.clamped();
        Self {
            weights: p.weights,
            threshold: p.threshold,
            smoothing: p.smoothing,
            _pad: [0.0; 3],
        }
    }
}

impl KernelParams {
    /// The parameters as a [`KeyParams`] value.
    pub fn to_key_params(&self) -> KeyParams {
        KeyParams::new(self.weights, self.threshold, self.smoothing)
    }
}

/// Available keying backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Auto-select best available (wgpu > CPU).
    #[default]
    Auto,
    /// CPU backend using rayon for parallelization.
    Cpu,
    /// wgpu backend (Vulkan/Metal/DX12).
    Wgpu,
}

impl Backend {
    /// Check if this backend is available on the current system.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Auto | Self::Cpu => true,
            #[cfg(feature = "wgpu")]
            Self::Wgpu => WgpuKernel::is_available(),
            #[cfg(not(feature = "wgpu"))]
            Self::Wgpu => false,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cpu => "cpu",
            Self::Wgpu => "wgpu",
        }
    }
}

/// The keying contract every backend implements.
pub trait KeyCompute: Send + Sync {
    /// Backend name.
    fn name(&self) -> &'static str;

    /// Runs the continuous keying kernel over every destination pixel.
    ///
    /// Source and destination may differ in extent; pixels are mapped
    /// 1:1 and destination pixels beyond the source read transparent
    /// black. The grid must cover the destination - a stale grid after a
    /// resize is a precondition violation reported as
    /// [`ComputeError::StaleGrid`], never an out-of-bounds access.
    fn key_frame(
        &self,
        src: &Frame,
        dst: &mut Frame,
        params: KernelParams,
        grid: &DispatchGrid,
    ) -> ComputeResult<()>;

    /// Applies a keying cube LUT per pixel. Extents must match.
    fn apply_lut(&self, src: &Frame, dst: &mut Frame, lut: &CubeLut) -> ComputeResult<()>;

    /// Porter-Duff over, premultiplied inputs: `bg = fg + bg * (1 - fg.a)`.
    fn composite_over(&self, fg: &Frame, bg: &mut Frame) -> ComputeResult<()>;
}

/// Grid-coverage precondition shared by backends.
pub(crate) fn check_grid(grid: &DispatchGrid, dst: &Frame) -> ComputeResult<()> {
    let (dw, dh) = dst.extent();
    if !grid.covers(dw, dh) {
        let (cw, ch) = grid.covered_extent();
        return Err(ComputeError::StaleGrid {
            covered_w: cw,
            covered_h: ch,
            dest_w: dw,
            dest_h: dh,
        });
    }
    Ok(())
}

/// Extent-equality precondition shared by backends.
pub(crate) fn check_same_extent(a: &Frame, b: &Frame) -> ComputeResult<()> {
    if a.extent() != b.extent() {
        let (ew, eh) = a.extent();
        let (aw, ah) = b.extent();
        return Err(ComputeError::DimensionMismatch {
            expected_w: ew,
            expected_h: eh,
            actual_w: aw,
            actual_h: ah,
        });
    }
    Ok(())
}

/// Picks the best available backend: wgpu when the feature is enabled and
/// an adapter exists, CPU otherwise.
pub fn select_best_backend() -> Backend {
    if Backend::Wgpu.is_available() {
        Backend::Wgpu
    } else {
        Backend::Cpu
    }
}

/// Describes each backend and its availability, for diagnostics.
pub fn describe_backends() -> Vec<(Backend, bool)> {
    vec![
        (Backend::Cpu, Backend::Cpu.is_available()),
        (Backend::Wgpu, Backend::Wgpu.is_available()),
    ]
}

/// Creates a backend instance.
///
/// Missing GPU capability is a configuration error surfaced here, at
/// startup - not retried per frame.
pub fn create_backend(backend: Backend) -> ComputeResult<Box<dyn KeyCompute>> {
    match backend {
        Backend::Auto => {
            let best = select_best_backend();
            debug!(backend = best.name(), "auto-selected keying backend");
            create_backend(best)
        }
        Backend::Cpu => Ok(Box::new(CpuKernel::new())),
        Backend::Wgpu => {
            #[cfg(feature = "wgpu")]
            {
                Ok(Box::new(WgpuKernel::new()?))
            }
            #[cfg(not(feature = "wgpu"))]
            {
                Err(ComputeError::BackendNotAvailable(
                    "wgpu feature not enabled".to_string(),
                ))
            }
        }
    }
}
