//! Presentation sinks.

use chroma_core::Frame;

/// Receives fully written frames for display.
///
/// The pipeline's only obligation is that the frame is complete before
/// the handoff; the sink may copy, upload, or drop it.
pub trait PresentationSink: Send {
    /// Accepts a completed frame.
    fn present(&mut self, frame: &Frame);
}

/// Sink that keeps the most recent frame, for tests and offline use.
#[derive(Debug, Default)]
pub struct MemorySink {
    last: Option<Frame>,
    presented: usize,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently presented frame, if any.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    /// Total number of frames presented.
    pub fn presented_count(&self) -> usize {
        self.presented
    }
}

impl PresentationSink for MemorySink {
    fn present(&mut self, frame: &Frame) {
        self.last = Some(frame.clone());
        self.presented += 1;
    }
}
