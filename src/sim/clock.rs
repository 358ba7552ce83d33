//! Frame clock
//!
//! Turns the animation-frame timestamp sequence into per-tick delta times.

/// Per-tick delta time source.
///
/// The first sample yields zero (no prior timestamp to diff against), and a
/// timestamp behind the previous one yields zero rather than a negative
/// delta. Keeps sampling across paused frames so resuming never produces a
/// delta spike.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Milliseconds elapsed since the previous sample.
    pub fn delta_ms(&mut self, timestamp: f64) -> f64 {
        let dt = match self.last {
            Some(prev) => (timestamp - prev).max(0.0),
            None => 0.0,
        };
        self.last = Some(timestamp);
        dt
    }
}
