//! # chroma-compute
//!
//! Execution backends for the per-pixel chroma-key kernel.
//!
//! Every pixel of a frame is classified independently of every other, so
//! the kernel is dispatched as an embarrassingly parallel grid of 16x16
//! tiles. Two backends implement the same [`KeyCompute`] contract:
//!
//! ```text
//! KeyCompute (trait)
//!     +-- CpuKernel  (rayon row parallelism)
//!     +-- WgpuKernel (WGSL compute shaders, `wgpu` feature)
//! ```
//!
//! # Example
//!
//! ```rust
//! use chroma_compute::{Backend, DispatchGrid, KernelParams, create_backend};
//! use chroma_core::{Frame, KeyParams, Rgba};
//!
//! let backend = create_backend(Backend::Cpu).unwrap();
//! let src = Frame::solid(64, 64, Rgba::new(0.0, 1.0, 0.0, 1.0)).unwrap();
//! let mut dst = Frame::new(64, 64).unwrap();
//! let grid = DispatchGrid::for_extent(64, 64);
//!
//! let params = KernelParams::from(&KeyParams::green_screen());
//! backend.key_frame(&src, &mut dst, params, &grid).unwrap();
//! assert_eq!(dst.pixel(0, 0).a, 0.0);
//! ```

pub mod backend;
pub mod grid;
mod shaders;

pub use backend::{Backend, CpuKernel, KernelParams, KeyCompute, create_backend, describe_backends, select_best_backend};
#[cfg(feature = "wgpu")]
pub use backend::WgpuKernel;
pub use grid::{DispatchGrid, TILE};

use thiserror::Error;

/// Errors from keying dispatch and backend setup.
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("failed to create device: {0}")]
    DeviceCreation(String),

    #[error("dimension mismatch: expected {expected_w}x{expected_h}, got {actual_w}x{actual_h}")]
    DimensionMismatch {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },

    #[error(
        "stale dispatch grid: groups cover {covered_w}x{covered_h}, destination is {dest_w}x{dest_h}"
    )]
    StaleGrid {
        covered_w: u32,
        covered_h: u32,
        dest_w: u32,
        dest_h: u32,
    },

    #[error("operation failed: {0}")]
    OperationFailed(String),
}

pub type ComputeResult<T> = Result<T, ComputeError>;
