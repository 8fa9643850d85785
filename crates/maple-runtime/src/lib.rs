//! Maple Runtime - Frame loop infrastructure
//!
//! Provides the host-side building blocks that drive a simulation:
//! - `FrameClock` / `SteppedClock` - millisecond frame timestamps from a fixed epoch
//! - `Frame` - one frame's time and viewport
//! - `FrameSystem` - trait for systems ticked once per frame
//! - `FrameLoop` - reads the clock and updates systems in order

mod clock;
mod frame;
mod frame_loop;
mod system;

pub use clock::{FrameClock, SteppedClock, TimeSource};
pub use frame::Frame;
pub use frame_loop::FrameLoop;
pub use system::FrameSystem;
