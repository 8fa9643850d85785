//! Frame clocks producing millisecond timestamps

use std::time::Instant;

/// Source of per-frame timestamps.
///
/// Values are milliseconds since an epoch fixed by the first call, so the
/// first frame always reads 0.
pub trait TimeSource {
    fn frame_time_ms(&mut self) -> u64;
}

/// Wall clock backed by `Instant`, monotonic by construction
#[derive(Default)]
pub struct FrameClock {
    start: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since the first frame, or `None` before it
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.start
            .map(|start| start.elapsed().as_millis().min(u64::MAX as u128) as u64)
    }
}

impl TimeSource for FrameClock {
    fn frame_time_ms(&mut self) -> u64 {
        match self.start {
            Some(start) => start.elapsed().as_millis().min(u64::MAX as u128) as u64,
            None => {
                self.start = Some(Instant::now());
                0
            }
        }
    }
}

/// Deterministic clock that advances a fixed interval per frame.
///
/// Used for headless runs and tests. The frame time is derived from the frame
/// counter rather than accumulated, so fractional intervals (e.g. 60 Hz) never
/// drift.
pub struct SteppedClock {
    /// Frame interval in milliseconds
    pub frame_ms: f64,
    frame: u64,
}

impl SteppedClock {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            frame_ms: frame_ms.max(0.0),
            frame: 0,
        }
    }

    /// Clock ticking at `hz` frames per second
    pub fn with_rate(hz: f64) -> Self {
        if hz > 0.0 {
            Self::new(1000.0 / hz)
        } else {
            Self::new(0.0)
        }
    }

    /// Number of frames handed out so far
    pub fn frames(&self) -> u64 {
        self.frame
    }
}

impl TimeSource for SteppedClock {
    fn frame_time_ms(&mut self) -> u64 {
        let t = (self.frame as f64 * self.frame_ms).floor() as u64;
        self.frame += 1;
        t
    }
}
