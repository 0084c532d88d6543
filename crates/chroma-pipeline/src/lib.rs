//! # chroma-pipeline
//!
//! Frame pipeline orchestration for chroma-key compositing.
//!
//! The pipeline drives one tick per display refresh: poll the frame
//! source, normalize the frame to the destination surface (aspect-fit,
//! format already converted by [`chroma_core::Frame`] intake), take one
//! consistent parameter snapshot, run the active keying strategy, and
//! hand the result to the presentation sink.
//!
//! ```text
//! FrameSource --poll--> normalize --snapshot--> KeyCompute --present--> PresentationSink
//!                                      ^
//!                                 KeyControl (shared, live-updatable)
//! ```
//!
//! A tick that finds no new frame, or whose dispatch fails transiently,
//! is skipped; the next tick naturally retries. Nothing in the loop
//! blocks on I/O.
//!
//! # Example
//!
//! ```rust
//! use chroma_compute::Backend;
//! use chroma_core::{Frame, KeyParams, Rgba};
//! use chroma_pipeline::{KeyControl, KeyPipeline, KeyStrategy, MemorySink, MemorySource, TickOutcome};
//!
//! let control = KeyControl::new(KeyParams::green_screen());
//! let mut pipeline =
//!     KeyPipeline::new(Backend::Cpu, KeyStrategy::PerPixel, control, 64, 64).unwrap();
//!
//! let green = Frame::solid(64, 64, Rgba::new(0.0, 1.0, 0.0, 1.0)).unwrap();
//! let mut source = MemorySource::new(vec![green]);
//! let mut sink = MemorySink::new();
//!
//! let outcome = pipeline.tick(&mut source, &mut sink).unwrap();
//! assert_eq!(outcome, TickOutcome::Presented);
//! assert_eq!(sink.last_frame().unwrap().pixel(0, 0).a, 0.0);
//! ```

#![warn(missing_docs)]

pub mod control;
pub mod normalize;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use control::KeyControl;
pub use normalize::{fit_scale, normalize_into};
pub use pipeline::{KeyPipeline, KeyStrategy, TickOutcome};
pub use sink::{MemorySink, PresentationSink};
pub use source::{FrameSource, LoopingSource, MemorySource, Poll};

use thiserror::Error;

/// Errors from pipeline construction and ticking.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Backend setup or dispatch failure.
    #[error(transparent)]
    Compute(#[from] chroma_compute::ComputeError),

    /// Frame allocation or layout failure.
    #[error(transparent)]
    Core(#[from] chroma_core::Error),

    /// Background frame does not match the destination surface.
    #[error("background extent {bg_w}x{bg_h} does not match destination {dst_w}x{dst_h}")]
    BackgroundMismatch {
        /// Background width.
        bg_w: u32,
        /// Background height.
        bg_h: u32,
        /// Destination width.
        dst_w: u32,
        /// Destination height.
        dst_h: u32,
    },
}

/// Result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
