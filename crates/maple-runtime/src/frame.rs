//! Per-frame input handed to systems

use maple_core::Viewport;

/// One rendered frame: when it happens and how much room there is
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Sequential frame number, starting at 0
    pub index: u64,
    /// Milliseconds since the first frame
    pub time_ms: u64,
    pub viewport: Viewport,
}

impl Frame {
    pub fn new(index: u64, time_ms: u64, viewport: Viewport) -> Self {
        Self {
            index,
            time_ms,
            viewport,
        }
    }
}
