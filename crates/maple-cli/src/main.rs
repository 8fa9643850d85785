//! Maple CLI - Command-line interface for the Maple leaf simulation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, simulate};

#[derive(Parser)]
#[command(name = "maple")]
#[command(about = "Headless driver for the floating leaves simulation", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation for a number of frames and report what happened
    Simulate {
        /// Path to a leaves config file (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Number of frames to simulate
        #[arg(long, default_value = "600")]
        frames: u64,

        /// Frame rate of the simulated host
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Viewport width
        #[arg(long, default_value = "360")]
        width: f32,

        /// Viewport height
        #[arg(long, default_value = "640")]
        height: f32,

        /// Random seed (defaults to the wall clock)
        #[arg(long)]
        seed: Option<u32>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,

        /// Report every Nth frame
        #[arg(long, default_value = "60")]
        every: u64,

        /// Pace frames against the wall clock instead of stepping instantly
        #[arg(long)]
        realtime: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Path to a leaves config file (TOML)
        #[arg(long)]
        config: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

/// Map `-v` repetitions to a log level; warnings are always shown
fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_env("RUST_LOG")
        .init();

    match cli.command {
        Commands::Simulate {
            config,
            frames,
            fps,
            width,
            height,
            seed,
            format,
            every,
            realtime,
        } => simulate::run(simulate::SimulateArgs {
            config,
            frames,
            fps,
            width,
            height,
            seed,
            format,
            every,
            realtime,
        }),
        Commands::Config { config } => config::run(config.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_log_level() {
        assert_eq!(log_level(0), log::LevelFilter::Warn);
        assert_eq!(log_level(1), log::LevelFilter::Info);
        assert_eq!(log_level(2), log::LevelFilter::Debug);
        assert_eq!(log_level(3), log::LevelFilter::Trace);
        assert_eq!(log_level(9), log::LevelFilter::Trace);
    }

    #[test]
    fn verbose_flag_is_global() {
        let cli = Cli::try_parse_from(["maple", "simulate", "-vv", "--frames", "2"]).unwrap();
        assert_eq!(log_level(cli.verbose), log::LevelFilter::Debug);
        let cli = Cli::try_parse_from(["maple", "-v", "config"]).unwrap();
        assert_eq!(log_level(cli.verbose), log::LevelFilter::Info);
    }
}
