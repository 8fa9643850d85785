//! CLI command implementations

pub mod config;
pub mod simulate;

use anyhow::{Context, Result};
use maple_leaves::LeavesConfig;

/// Load the config at `path`, or the defaults when none is given
pub fn load_config(path: Option<&str>) -> Result<LeavesConfig> {
    match path {
        Some(path) => {
            LeavesConfig::load(path).with_context(|| format!("Failed to load config '{}'", path))
        }
        None => Ok(LeavesConfig::default()),
    }
}
