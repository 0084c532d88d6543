//! The per-tick orchestrator.

use chroma_compute::{Backend, ComputeResult, DispatchGrid, KernelParams, KeyCompute, create_backend};
use chroma_core::Frame;
use chroma_lut::CubeLut;
use tracing::{debug, trace, warn};

use crate::control::KeyControl;
use crate::normalize::normalize_into;
use crate::sink::PresentationSink;
use crate::source::{FrameSource, Poll};
use crate::{PipelineError, PipelineResult};

/// How each frame is keyed. A closed set, selected at configuration time.
#[derive(Debug, Clone)]
pub enum KeyStrategy {
    /// Table lookup per pixel: hard edge, premultiplied output.
    CubeLut(CubeLut),
    /// Continuous kernel per pixel: soft edge, straight alpha output.
    PerPixel,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was keyed and handed to the sink.
    Presented,
    /// The source had nothing new; dispatch was skipped.
    NoNewFrame,
    /// The source is exhausted.
    EndOfStream,
    /// Dispatch failed transiently; the next tick retries naturally.
    Skipped,
    /// The pipeline was stopped; no further dispatches occur.
    Stopped,
}

/// Drives the poll / normalize / key / present cycle.
///
/// One pipeline owns its backend, its scratch frames, and the dispatch
/// grid for the current destination extent. [`resize`](Self::resize)
/// reallocates all three together, so a dispatch can never observe a
/// grid computed for an older surface.
pub struct KeyPipeline {
    backend: Box<dyn KeyCompute>,
    strategy: KeyStrategy,
    control: KeyControl,
    grid: DispatchGrid,
    normalized: Frame,
    keyed: Frame,
    composited: Frame,
    background: Option<Frame>,
    stopped: bool,
}

impl KeyPipeline {
    /// Creates a pipeline rendering to a `width` x `height` surface.
    ///
    /// Backend construction failures (no GPU adapter, feature disabled)
    /// are fatal here, at configuration time; they are never retried per
    /// frame.
    pub fn new(
        backend: Backend,
        strategy: KeyStrategy,
        control: KeyControl,
        width: u32,
        height: u32,
    ) -> PipelineResult<Self> {
        let backend = create_backend(backend)?;
        debug!(backend = backend.name(), width, height, "pipeline configured");
        Ok(Self {
            backend,
            strategy,
            control,
            grid: DispatchGrid::for_extent(width, height),
            normalized: Frame::new(width, height)?,
            keyed: Frame::new(width, height)?,
            composited: Frame::new(width, height)?,
            background: None,
            stopped: false,
        })
    }

    /// Composites keyed output over a background before presenting.
    ///
    /// The background must match the destination extent and must be
    /// premultiplied (opaque frames are trivially premultiplied).
    pub fn with_background(mut self, background: Frame) -> PipelineResult<Self> {
        let (bw, bh) = background.extent();
        let (dw, dh) = self.keyed.extent();
        if (bw, bh) != (dw, dh) {
            return Err(PipelineError::BackgroundMismatch {
                bg_w: bw,
                bg_h: bh,
                dst_w: dw,
                dst_h: dh,
            });
        }
        self.background = Some(background);
        Ok(self)
    }

    /// The shared parameter control handle.
    pub fn control(&self) -> &KeyControl {
        &self.control
    }

    /// Name of the active backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Destination extent.
    pub fn extent(&self) -> (u32, u32) {
        self.keyed.extent()
    }

    /// Resizes the destination surface, recomputing the dispatch grid
    /// and rescaling any background before the next tick can dispatch.
    pub fn resize(&mut self, width: u32, height: u32) -> PipelineResult<()> {
        self.grid = DispatchGrid::for_extent(width, height);
        self.normalized = Frame::new(width, height)?;
        self.keyed = Frame::new(width, height)?;
        self.composited = Frame::new(width, height)?;
        if let Some(bg) = self.background.take() {
            let mut rescaled = Frame::new(width, height)?;
            normalize_into(&bg, &mut rescaled);
            self.background = Some(rescaled);
        }
        debug!(width, height, "destination resized, grid recomputed");
        Ok(())
    }

    /// Stops the pipeline; every subsequent tick is a no-op.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Whether the pipeline has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Runs one display tick: poll, normalize, key, present.
    ///
    /// Transient dispatch failures are logged and reported as
    /// [`TickOutcome::Skipped`]; the pipeline stays usable.
    pub fn tick(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn PresentationSink,
    ) -> PipelineResult<TickOutcome> {
        if self.stopped {
            return Ok(TickOutcome::Stopped);
        }

        let frame = match source.poll_frame() {
            Poll::Frame(frame) => frame,
            Poll::Pending => {
                trace!("no new frame, skipping dispatch");
                return Ok(TickOutcome::NoNewFrame);
            }
            Poll::EndOfStream => return Ok(TickOutcome::EndOfStream),
        };

        normalize_into(&frame, &mut self.normalized);

        if let Err(e) = self.dispatch() {
            warn!(error = %e, "dispatch failed, skipping tick");
            return Ok(TickOutcome::Skipped);
        }

        let output = if self.background.is_some() {
            &self.composited
        } else {
            &self.keyed
        };
        sink.present(output);
        Ok(TickOutcome::Presented)
    }

    fn dispatch(&mut self) -> ComputeResult<()> {
        // One snapshot per tick; the five scalars stay mutually
        // consistent even while a control writer is active.
        let params = self.control.snapshot();

        match &self.strategy {
            KeyStrategy::PerPixel => {
                self.backend.key_frame(
                    &self.normalized,
                    &mut self.keyed,
                    KernelParams::from(&params),
                    &self.grid,
                )?;
            }
            KeyStrategy::CubeLut(lut) => {
                self.backend.apply_lut(&self.normalized, &mut self.keyed, lut)?;
            }
        }

        if let Some(bg) = &self.background {
            // The kernel path emits straight alpha; over needs
            // premultiplied. The LUT path is already premultiplied.
            if matches!(self.strategy, KeyStrategy::PerPixel) {
                self.keyed.premultiply_alpha();
            }
            self.composited.data_mut().copy_from_slice(bg.data());
            self.backend.composite_over(&self.keyed, &mut self.composited)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for KeyPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPipeline")
            .field("backend", &self.backend.name())
            .field("extent", &self.keyed.extent())
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}
