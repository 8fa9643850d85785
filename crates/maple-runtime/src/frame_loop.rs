//! Synchronous frame loop: read time, update systems, hand off to the renderer

use crate::{Frame, FrameSystem, TimeSource};
use maple_core::{Result, Viewport};

/// Drives registered systems from a time source
pub struct FrameLoop<T: TimeSource> {
    clock: T,
    systems: Vec<Box<dyn FrameSystem>>,
    frame_index: u64,
    last_frame: Option<Frame>,
}

impl<T: TimeSource> FrameLoop<T> {
    pub fn new(clock: T) -> Self {
        Self {
            clock,
            systems: Vec::new(),
            frame_index: 0,
            last_frame: None,
        }
    }

    /// Register and initialize a system
    pub fn register(&mut self, mut system: Box<dyn FrameSystem>) -> Result<()> {
        system.initialize()?;
        log::debug!("Registered frame system '{}'", system.name());
        self.systems.push(system);
        Ok(())
    }

    /// Read the clock and produce the next frame without updating any system.
    ///
    /// For hosts that own their systems directly.
    pub fn advance(&mut self, viewport: Viewport) -> Frame {
        let frame = Frame::new(self.frame_index, self.clock.frame_time_ms(), viewport);
        self.frame_index += 1;
        self.last_frame = Some(frame);
        frame
    }

    /// Advance one frame with the given viewport and update registered systems
    pub fn step(&mut self, viewport: Viewport) -> Result<Frame> {
        let frame = self.advance(viewport);
        for system in &mut self.systems {
            system.update(&frame)?;
        }
        Ok(frame)
    }

    /// Shut down all systems in reverse registration order
    pub fn shutdown(&mut self) -> Result<()> {
        for system in self.systems.iter_mut().rev() {
            system.shutdown()?;
            log::debug!("Shut down frame system '{}'", system.name());
        }
        self.systems.clear();
        Ok(())
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SteppedClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        seen: Rc<RefCell<Vec<u64>>>,
        shut_down: Rc<RefCell<bool>>,
    }

    impl FrameSystem for Recorder {
        fn initialize(&mut self) -> Result<()> {
            Ok(())
        }

        fn update(&mut self, frame: &Frame) -> Result<()> {
            self.seen.borrow_mut().push(frame.time_ms);
            Ok(())
        }

        fn shutdown(&mut self) -> Result<()> {
            *self.shut_down.borrow_mut() = true;
            Ok(())
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    #[test]
    fn test_step_feeds_clock_to_systems() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let shut_down = Rc::new(RefCell::new(false));
        let mut frame_loop = FrameLoop::new(SteppedClock::new(100.0));
        frame_loop
            .register(Box::new(Recorder {
                seen: seen.clone(),
                shut_down: shut_down.clone(),
            }))
            .unwrap();

        for _ in 0..3 {
            frame_loop.step(Viewport::new(10.0, 10.0)).unwrap();
        }
        assert_eq!(*seen.borrow(), vec![0, 100, 200]);
        assert_eq!(frame_loop.last_frame().unwrap().index, 2);

        frame_loop.shutdown().unwrap();
        assert!(*shut_down.borrow());
        assert_eq!(frame_loop.system_count(), 0);
    }

    #[test]
    fn test_advance_counts_frames() {
        let mut frame_loop = FrameLoop::new(SteppedClock::new(10.0));
        let a = frame_loop.advance(Viewport::new(1.0, 2.0));
        let b = frame_loop.advance(Viewport::new(3.0, 4.0));
        assert_eq!((a.index, a.time_ms), (0, 0));
        assert_eq!((b.index, b.time_ms), (1, 10));
        assert_eq!(b.viewport, Viewport::new(3.0, 4.0));
        assert_eq!(frame_loop.clock().frames(), 2);
    }
}
