//! Frame system trait

use crate::Frame;
use maple_core::Result;

/// A system that can be ticked by the frame loop
///
/// Systems are updated in registration order, once per frame, on the thread
/// that owns the loop.
pub trait FrameSystem {
    /// Called once when the system is first registered
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame, before the frame is drawn
    fn update(&mut self, frame: &Frame) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
