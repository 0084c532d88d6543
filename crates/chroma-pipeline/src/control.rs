//! Shared, live-updatable key parameters.

use std::sync::{Arc, Mutex};

use chroma_core::KeyParams;

/// Cloneable handle to the key parameters of a running pipeline.
///
/// A UI control writes individual fields at any time; the dispatch path
/// takes one [`snapshot`](Self::snapshot) per tick, so the five scalars
/// of a single dispatch are always mutually consistent even while a
/// writer is active. Writes are never validated here; degenerate values
/// are clamped on the consumption path.
#[derive(Debug, Clone, Default)]
pub struct KeyControl {
    inner: Arc<Mutex<KeyParams>>,
}

impl KeyControl {
    /// Creates a control with initial parameters.
    pub fn new(params: KeyParams) -> Self {
        Self {
            inner: Arc::new(Mutex::new(params)),
        }
    }

    /// Replaces the whole parameter set.
    pub fn set(&self, params: KeyParams) {
        *self.lock() = params;
    }

    /// Updates the keying threshold.
    pub fn set_threshold(&self, threshold: f32) {
        self.lock().threshold = threshold;
    }

    /// Updates the smoothing band width.
    pub fn set_smoothing(&self, smoothing: f32) {
        self.lock().smoothing = smoothing;
    }

    /// Updates the per-channel weights.
    pub fn set_weights(&self, weights: [f32; 3]) {
        self.lock().weights = weights;
    }

    /// Takes a consistent copy of the current parameters.
    pub fn snapshot(&self) -> KeyParams {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, KeyParams> {
        // A writer can only panic between field writes of plain f32s;
        // the stored value is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_sees_updates() {
        let control = KeyControl::new(KeyParams::green_screen());
        control.set_threshold(0.6);
        control.set_smoothing(0.2);

        let snap = control.snapshot();
        assert_eq!(snap.threshold, 0.6);
        assert_eq!(snap.smoothing, 0.2);
        assert_eq!(snap.weights, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_clones_share_state() {
        let a = KeyControl::new(KeyParams::green_screen());
        let b = a.clone();
        b.set_weights([0.0, 0.0, 1.0]);
        assert_eq!(a.snapshot().weights, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_concurrent_writers() {
        let control = KeyControl::new(KeyParams::green_screen());
        let writer = control.clone();
        let handle = std::thread::spawn(move || {
            for i in 0..1000 {
                writer.set_threshold(i as f32 / 1000.0);
            }
        });
        for _ in 0..1000 {
            let snap = control.snapshot();
            assert!((0.0..=1.0).contains(&snap.threshold));
        }
        handle.join().unwrap();
    }
}
