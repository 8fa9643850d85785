//! Headless simulation command

use anyhow::{bail, Context, Result};
use maple_core::{Color, Viewport};
use maple_leaves::{Leaf, LeafSystem, LeavesConfig, SimulationStats};
use maple_runtime::{FrameClock, FrameLoop, FrameSystem, SteppedClock, TimeSource};
use serde::Serialize;
use std::time::Duration;

pub struct SimulateArgs {
    pub config: Option<String>,
    pub frames: u64,
    pub fps: f64,
    pub width: f32,
    pub height: f32,
    pub seed: Option<u32>,
    pub format: String,
    pub every: u64,
    pub realtime: bool,
}

#[derive(Serialize)]
struct Report {
    seed: u32,
    capacity: usize,
    viewport: Viewport,
    frames: Vec<FrameSample>,
    stats: SimulationStats,
}

#[derive(Serialize)]
struct FrameSample {
    index: u64,
    time_ms: u64,
    active: usize,
    free: usize,
    leaves: Vec<LeafSample>,
}

#[derive(Serialize)]
struct LeafSample {
    #[serde(flatten)]
    leaf: Leaf,
    /// Palette color, when the color index falls inside the built-in palette
    fill: Option<String>,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        bail!("--fps must be positive, got {}", args.fps);
    }

    let config = super::load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(|| maple_leaves::rand::seed_from_time());
    log::debug!("Simulating {} frames at {} fps, seed {}", args.frames, args.fps, seed);

    let pace = if args.realtime {
        let secs = 1.0 / args.fps;
        Some(
            Duration::try_from_secs_f64(secs)
                .with_context(|| format!("--fps {} gives an unusable frame interval", args.fps))?,
        )
    } else {
        None
    };

    let viewport = Viewport::sanitized(args.width, args.height);
    let mut system = LeafSystem::seeded(config.clone(), seed);
    system.initialize()?;

    let samples = if args.realtime {
        drive(FrameLoop::new(FrameClock::new()), &mut system, &args, viewport, pace)?
    } else {
        drive(
            FrameLoop::new(SteppedClock::with_rate(args.fps)),
            &mut system,
            &args,
            viewport,
            pace,
        )?
    };

    system.shutdown()?;
    let stats = system.simulation().stats();

    match args.format.as_str() {
        "json" => {
            let report = Report {
                seed,
                capacity: config.capacity,
                viewport,
                frames: samples,
                stats,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_text(&config, seed, &samples, &stats),
    }

    Ok(())
}

fn drive<T: TimeSource>(
    mut frame_loop: FrameLoop<T>,
    system: &mut LeafSystem,
    args: &SimulateArgs,
    viewport: Viewport,
    pace: Option<Duration>,
) -> Result<Vec<FrameSample>> {
    let every = args.every.max(1);
    let palette = Color::autumn_palette();
    let mut samples = Vec::new();

    for _ in 0..args.frames {
        let frame = frame_loop.advance(viewport);
        system.update(&frame)?;

        let last = frame.index + 1 == args.frames;
        if frame.index % every == 0 || last {
            let sim = system.simulation();
            samples.push(FrameSample {
                index: frame.index,
                time_ms: frame.time_ms,
                active: sim.active_count(),
                free: sim.free_count(),
                leaves: sim
                    .active_leaves()
                    .iter()
                    .map(|leaf| LeafSample {
                        fill: palette.get(leaf.color.raw() as usize).map(hex),
                        leaf: leaf.clone(),
                    })
                    .collect(),
            });
        }

        if let Some(pace) = pace {
            std::thread::sleep(pace);
        }
    }

    Ok(samples)
}

fn print_text(config: &LeavesConfig, seed: u32, samples: &[FrameSample], stats: &SimulationStats) {
    println!(
        "Simulating {} leaves ({} spawn, {}ms + {}ms), seed {}",
        config.capacity,
        config.spawn.mode,
        config.spawn.base_ms,
        config.spawn.variance_ms,
        seed
    );
    println!();
    println!("  {:>6}  {:>8}  {:>6}  {:>6}", "frame", "time", "active", "free");
    for sample in samples {
        println!(
            "  {:>6}  {:>6}ms  {:>6}  {:>6}",
            sample.index, sample.time_ms, sample.active, sample.free
        );
    }
    println!();
    println!("Ticks:          {}", stats.ticks);
    println!("Spawned:        {}", stats.spawned);
    println!("Recycled:       {}", stats.recycled);
    println!("Skipped spawns: {}", stats.skipped_spawns);
    println!("Peak active:    {}", stats.peak_active);
}

fn hex(color: &Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(color.r),
        channel(color.g),
        channel(color.b)
    )
}
