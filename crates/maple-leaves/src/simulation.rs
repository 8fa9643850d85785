//! The leaf simulation: spawn from the pool, integrate, recycle at the right edge

use crate::config::LeavesConfig;
use crate::leaf::{Leaf, LeafPool};
use crate::rand::{LeafRng, RandomSource};
use crate::schedule::SpawnSchedule;
use maple_core::{AssetId, Viewport};
use serde::Serialize;

/// Running counters, mostly for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    pub ticks: u64,
    pub spawned: u64,
    pub recycled: u64,
    /// Spawns that were due but found the pool empty
    pub skipped_spawns: u64,
    pub peak_active: usize,
}

/// Frame-driven floating leaves simulation over a fixed pool.
///
/// Call [`tick`](Self::tick) once per frame, then read
/// [`active_leaves`](Self::active_leaves) to draw. Nothing is allocated after
/// construction.
pub struct LeafSimulation<R: RandomSource = LeafRng> {
    config: LeavesConfig,
    pool: LeafPool,
    schedule: SpawnSchedule,
    rng: R,
    viewport: Viewport,
    last_update_ms: u64,
    stats: SimulationStats,
}

impl<R: RandomSource> LeafSimulation<R> {
    pub fn new(config: LeavesConfig, rng: R) -> Self {
        let pool = LeafPool::new(config.capacity);
        let schedule = SpawnSchedule::new(config.spawn);
        Self {
            config,
            pool,
            schedule,
            rng,
            viewport: Viewport::ZERO,
            last_update_ms: 0,
            stats: SimulationStats::default(),
        }
    }

    /// Advance the simulation to `time_ms` (milliseconds since the first frame)
    pub fn tick(&mut self, time_ms: u64, width: f32, height: f32) {
        self.viewport = Viewport::sanitized(width, height);
        self.stats.ticks += 1;

        if self.schedule.is_due(time_ms) {
            if let Some(leaf) = self.pool.spawn() {
                randomize_leaf(leaf, &self.config, &mut self.rng, self.viewport);
                log::trace!("Spawned leaf {} at {time_ms}ms", leaf.id);
                self.schedule.spawned_at(time_ms, &mut self.rng);
                self.stats.spawned += 1;
            } else {
                self.stats.skipped_spawns += 1;
            }
        }

        if time_ms < self.last_update_ms {
            log::trace!(
                "Clock went backwards ({}ms -> {time_ms}ms), holding leaves still",
                self.last_update_ms
            );
        }
        let dt = delta_seconds(self.last_update_ms, time_ms);

        for leaf in self.pool.active_mut() {
            advance_leaf(leaf, &self.config, dt);
        }
        self.stats.peak_active = self.stats.peak_active.max(self.pool.active_count());

        let viewport = self.viewport;
        let recycled = self.pool.recycle_where(|leaf| !viewport.contains_x(leaf.x));
        self.stats.recycled += recycled as u64;

        self.last_update_ms = time_ms;
    }

    /// Leaves to draw this frame; valid until the next tick
    pub fn active_leaves(&self) -> &[Leaf] {
        self.pool.active()
    }

    /// Pooled leaves, holding stale values from their last flight
    pub fn free_leaves(&self) -> &[Leaf] {
        self.pool.free()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn free_count(&self) -> usize {
        self.pool.free_count()
    }

    pub fn next_spawn_ms(&self) -> u64 {
        self.schedule.next_spawn_ms()
    }

    pub fn last_update_ms(&self) -> u64 {
        self.last_update_ms
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &LeavesConfig {
        &self.config
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    /// Return every leaf to the pool and restart both clocks at `now_ms`,
    /// the host's current frame time
    pub fn reset(&mut self, now_ms: u64) {
        self.pool.recycle_all();
        self.schedule.restart_at(now_ms);
        self.last_update_ms = now_ms;
        self.stats = SimulationStats::default();
    }
}

/// Seconds between two frame timestamps; a backwards step counts as zero
pub(crate) fn delta_seconds(last_ms: u64, now_ms: u64) -> f32 {
    now_ms.saturating_sub(last_ms) as f32 / 1000.0
}

fn randomize_leaf<R: RandomSource>(
    leaf: &mut Leaf,
    config: &LeavesConfig,
    rng: &mut R,
    viewport: Viewport,
) {
    let r = &config.ranges;

    let y_max = if config.clamp_y_to_height {
        r.y.max.min(viewport.height).max(r.y.min)
    } else {
        r.y.max
    };

    leaf.x = rng.range(r.x.min, r.x.max);
    leaf.y = rng.range(r.y.min, y_max);
    leaf.scale = rng.range(r.scale.min, r.scale.max);
    leaf.x_speed = rng.range(r.x_speed.min, r.x_speed.max);
    leaf.y_speed = rng.range(r.y_speed.min, r.y_speed.max);
    leaf.rotation = rng.range(r.rotation.min, r.rotation.max);

    let spin = rng.range(r.rotation_speed.min, r.rotation_speed.max);
    leaf.rotation_speed = if config.random_spin_direction && rng.coin() {
        -spin
    } else {
        spin
    };

    leaf.period = rng.range(r.period.min, r.period.max);
    leaf.amplitude = rng.range(r.amplitude.min, r.amplitude.max);
    leaf.alpha = if config.fade_in_rate > 0.0 { 0.0 } else { 1.0 };
    leaf.shape = AssetId(rng.pick(config.shape_count as usize) as u32);
    leaf.color = AssetId(rng.pick(config.color_count as usize) as u32);
}

fn advance_leaf(leaf: &mut Leaf, config: &LeavesConfig, dt: f32) {
    leaf.rotation += leaf.rotation_speed * dt;
    leaf.x += leaf.x_speed * dt;
    // Wobble follows x, so its wavelength is fixed on screen regardless of speed
    let wobble = if config.wobble {
        leaf.period * (leaf.amplitude * leaf.x).sin()
    } else {
        0.0
    };
    leaf.y += wobble + leaf.y_speed * dt;
    leaf.alpha = (leaf.alpha + config.fade_in_rate * dt).clamp(0.0, 1.0);
}
