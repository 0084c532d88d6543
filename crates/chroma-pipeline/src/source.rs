//! Frame sources.
//!
//! A source is polled once per tick and never blocks: either a new frame
//! arrived since the last poll, or nothing did, or the stream ended.
//! Looping playback is an explicit state transition layered on top
//! ([`LoopingSource`]), not a delivery-mechanism callback.

use chroma_core::Frame;
use tracing::trace;

/// Result of one non-blocking poll.
#[derive(Debug, Clone, PartialEq)]
pub enum Poll {
    /// A new frame arrived since the last poll.
    Frame(Frame),
    /// No new frame yet; skip this tick.
    Pending,
    /// The stream is exhausted.
    EndOfStream,
}

/// A non-blocking producer of frames.
pub trait FrameSource: Send {
    /// Polls for a frame that arrived since the last call.
    fn poll_frame(&mut self) -> Poll;

    /// Rewinds to the beginning of the stream.
    fn seek_start(&mut self);
}

/// In-memory source that yields a fixed sequence of frames, one per poll.
#[derive(Debug, Clone)]
pub struct MemorySource {
    frames: Vec<Frame>,
    cursor: usize,
}

impl MemorySource {
    /// Creates a source over a frame sequence.
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Number of frames remaining before end of stream.
    pub fn remaining(&self) -> usize {
        self.frames.len() - self.cursor
    }
}

impl FrameSource for MemorySource {
    fn poll_frame(&mut self) -> Poll {
        match self.frames.get(self.cursor) {
            Some(frame) => {
                self.cursor += 1;
                Poll::Frame(frame.clone())
            }
            None => Poll::EndOfStream,
        }
    }

    fn seek_start(&mut self) {
        self.cursor = 0;
    }
}

/// Wraps a source so end-of-stream seeks back to the start.
///
/// An inner source that is empty (end-of-stream immediately after a
/// rewind) reports [`Poll::Pending`] rather than looping forever.
#[derive(Debug)]
pub struct LoopingSource<S> {
    inner: S,
    loops: u64,
}

impl<S: FrameSource> LoopingSource<S> {
    /// Wraps a source.
    pub fn new(inner: S) -> Self {
        Self { inner, loops: 0 }
    }

    /// How many times playback has wrapped around.
    pub fn loops(&self) -> u64 {
        self.loops
    }

    /// Unwraps the inner source.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FrameSource> FrameSource for LoopingSource<S> {
    fn poll_frame(&mut self) -> Poll {
        match self.inner.poll_frame() {
            Poll::EndOfStream => {
                self.inner.seek_start();
                self.loops += 1;
                trace!(loops = self.loops, "stream ended, seeking to start");
                match self.inner.poll_frame() {
                    // Empty even after a rewind.
                    Poll::EndOfStream => Poll::Pending,
                    poll => poll,
                }
            }
            poll => poll,
        }
    }

    fn seek_start(&mut self) {
        self.inner.seek_start();
    }
}
