//! Seek Buffer
//!
//! Holds the latest seek target while the media cannot honor it yet.

/// Clamp a seek target into `[0, duration]`, or `>= 0` when the duration
/// is unknown
pub fn clamp_seek(target: f64, duration: Option<f64>) -> f64 {
    let floor = target.max(0.0);
    match duration {
        Some(duration) if duration.is_finite() && duration >= 0.0 => floor.min(duration),
        _ => floor,
    }
}

/// Single pending seek slot (last write wins)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeekBuffer {
    pending: Option<f64>,
}

impl SeekBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a target, replacing any older one. Non-finite targets are ignored.
    pub fn request(&mut self, target: f64) {
        if target.is_finite() {
            self.pending = Some(target);
        }
    }

    pub fn pending(&self) -> Option<f64> {
        self.pending
    }

    /// Take the pending target, clamped to the media's duration
    pub fn take(&mut self, duration: Option<f64>) -> Option<f64> {
        self.pending.take().map(|target| clamp_seek(target, duration))
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
