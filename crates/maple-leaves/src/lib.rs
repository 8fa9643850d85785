//! Maple Leaves - Pooled floating-leaves particle simulation
//!
//! Provides a frame-driven leaf simulation with:
//! - A fixed-capacity leaf pool (active prefix / free suffix, swap-remove recycling)
//! - Fixed or jittered spawn cadence
//! - Drift, sinusoidal wobble, fall, spin and fade-in kinematics
//! - Injectable randomness for reproducible runs
//! - Instance packing for instanced draw calls

pub mod config;
pub mod leaf;
pub mod rand;
pub mod render;
pub mod schedule;
pub mod simulation;

use maple_core::Result;
use maple_runtime::{Frame, FrameSystem};

pub use config::{FloatRange, LeavesConfig, SpawnMode, SpawnPolicy, SpawnRanges};
pub use leaf::{Leaf, LeafPool};
pub use rand::{LeafRng, RandomSource};
pub use render::{LeafBatch, LeafInstance};
pub use simulation::{LeafSimulation, SimulationStats};

/// The leaf system - implements FrameSystem for integration with the frame loop.
pub struct LeafSystem<R: RandomSource = LeafRng> {
    simulation: LeafSimulation<R>,
    batch: LeafBatch,
}

impl<R: RandomSource> LeafSystem<R> {
    pub fn new(config: LeavesConfig, rng: R) -> Self {
        let batch = LeafBatch::with_capacity(config.capacity);
        Self {
            simulation: LeafSimulation::new(config, rng),
            batch,
        }
    }

    pub fn simulation(&self) -> &LeafSimulation<R> {
        &self.simulation
    }

    /// Instance data for the most recent frame
    pub fn batch(&self) -> &LeafBatch {
        &self.batch
    }
}

impl LeafSystem<LeafRng> {
    /// Reproducible system seeded with `seed`
    pub fn seeded(config: LeavesConfig, seed: u32) -> Self {
        Self::new(config, LeafRng::new(seed))
    }
}

impl<R: RandomSource> FrameSystem for LeafSystem<R> {
    fn initialize(&mut self) -> Result<()> {
        self.simulation.config().validate()?;
        log::info!(
            "Leaf pool ready: {} leaves, first spawn at {}ms",
            self.simulation.capacity(),
            self.simulation.next_spawn_ms()
        );
        Ok(())
    }

    fn update(&mut self, frame: &Frame) -> Result<()> {
        self.simulation
            .tick(frame.time_ms, frame.viewport.width, frame.viewport.height);
        let pivot = self.simulation.config().pivot;
        self.batch.pack(self.simulation.active_leaves(), pivot);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        let stats = self.simulation.stats();
        log::info!(
            "Leaves shut down after {} ticks: {} spawned, {} recycled, peak {} active",
            stats.ticks,
            stats.spawned,
            stats.recycled,
            stats.peak_active
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "leaves"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maple_core::Viewport;
    use maple_runtime::{FrameLoop, SteppedClock};

    #[test]
    fn update_packs_active_leaves() {
        let mut system = LeafSystem::seeded(LeavesConfig::default(), 42);
        system.initialize().unwrap();
        for i in 0..120u64 {
            let frame = Frame::new(i, i * 16, Viewport::new(360.0, 640.0));
            system.update(&frame).unwrap();
            assert_eq!(system.batch().len(), system.simulation().active_count());
        }
        assert!(!system.batch().is_empty());
        system.shutdown().unwrap();
    }

    #[test]
    fn invalid_config_fails_initialize() {
        let mut config = LeavesConfig::default();
        config.ranges.x_speed = FloatRange::new(-10.0, 10.0);
        let mut system = LeafSystem::seeded(config, 1);
        assert!(system.initialize().is_err());
    }

    #[test]
    fn runs_inside_frame_loop() {
        let mut frame_loop = FrameLoop::new(SteppedClock::with_rate(60.0));
        frame_loop
            .register(Box::new(LeafSystem::seeded(LeavesConfig::default(), 7)))
            .unwrap();
        for _ in 0..60 {
            frame_loop.step(Viewport::new(360.0, 640.0)).unwrap();
        }
        let last = frame_loop.last_frame().unwrap();
        assert_eq!(last.index, 59);
        assert_eq!(last.time_ms, 983);
        frame_loop.shutdown().unwrap();
    }
}
