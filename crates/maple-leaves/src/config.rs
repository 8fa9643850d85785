//! Simulation configuration (parsed from TOML) and spawn randomization ranges

use maple_core::{MapleError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// Hard ceiling on pool size
pub const MAX_CAPACITY: usize = 10_000;

/// Half-open float range `[min, max)` sampled on spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate range that always yields `value`
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn check(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(MapleError::ValidationError(format!(
                "ranges.{name} must be finite"
            )));
        }
        if self.min > self.max {
            return Err(MapleError::ValidationError(format!(
                "ranges.{name}: min {} is greater than max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl From<FloatRange> for [f64; 2] {
    fn from(r: FloatRange) -> Self {
        [widen(r.min), widen(r.max)]
    }
}

/// How the delay until the next spawn is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnMode {
    /// Always `base_ms`
    Fixed,
    /// `base_ms` plus a uniform draw from `[0, variance_ms)`
    Jittered,
}

impl SpawnMode {
    const NAMES: [&'static str; 2] = ["fixed", "jittered"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnMode::Fixed => "fixed",
            SpawnMode::Jittered => "jittered",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "fixed" => Ok(SpawnMode::Fixed),
            "jittered" => Ok(SpawnMode::Jittered),
            other => Err(MapleError::InvalidEnumValue {
                value: other.to_string(),
                allowed: Self::NAMES.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for SpawnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spawn cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpawnPolicy {
    pub mode: SpawnMode,
    pub base_ms: u64,
    pub variance_ms: u64,
    /// Time of the first spawn
    #[serde(rename = "first_ms")]
    pub first_spawn_ms: u64,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            mode: SpawnMode::Jittered,
            base_ms: 100,
            variance_ms: 200,
            first_spawn_ms: 0,
        }
    }
}

impl SpawnPolicy {
    pub fn fixed(interval_ms: u64) -> Self {
        Self {
            mode: SpawnMode::Fixed,
            base_ms: interval_ms,
            variance_ms: 0,
            first_spawn_ms: 0,
        }
    }

    pub fn jittered(base_ms: u64, variance_ms: u64) -> Self {
        Self {
            mode: SpawnMode::Jittered,
            base_ms,
            variance_ms,
            first_spawn_ms: 0,
        }
    }
}

/// Ranges every spawned leaf is randomized from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpawnRanges {
    pub x: FloatRange,
    pub y: FloatRange,
    pub scale: FloatRange,
    pub x_speed: FloatRange,
    pub y_speed: FloatRange,
    /// Degrees
    pub rotation: FloatRange,
    /// Magnitude in degrees per second
    pub rotation_speed: FloatRange,
    pub period: FloatRange,
    pub amplitude: FloatRange,
}

impl Default for SpawnRanges {
    fn default() -> Self {
        Self {
            x: FloatRange::new(0.0, 100.0),
            y: FloatRange::new(16.0, 100.0),
            scale: FloatRange::new(0.8, 1.2),
            x_speed: FloatRange::new(90.0, 136.0),
            y_speed: FloatRange::new(48.0, 70.0),
            rotation: FloatRange::new(0.0, 360.0),
            rotation_speed: FloatRange::new(24.0, 180.0),
            period: FloatRange::new(0.05, 0.6),
            amplitude: FloatRange::new(0.003, 0.05),
        }
    }
}

/// Configuration for one leaf simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeavesConfig {
    /// Number of pooled leaves; the most that can be on screen at once
    pub capacity: usize,
    /// Alpha gained per second after spawning; 0 spawns leaves fully opaque
    #[serde(serialize_with = "serialize_f32")]
    pub fade_in_rate: f32,
    /// Apply the sinusoidal vertical wobble
    pub wobble: bool,
    /// Pick a random spin direction per leaf instead of always clockwise
    pub random_spin_direction: bool,
    /// Clamp the upper bound of the y range to the viewport height
    pub clamp_y_to_height: bool,
    /// Number of registered leaf shapes to choose from
    pub shape_count: u32,
    /// Number of registered leaf colors to choose from
    pub color_count: u32,
    /// Rotation and scale origin, relative to the leaf's position
    #[serde(serialize_with = "serialize_vec2")]
    pub pivot: [f32; 2],
    pub spawn: SpawnPolicy,
    pub ranges: SpawnRanges,
}

impl Default for LeavesConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            fade_in_rate: 0.97,
            wobble: true,
            random_spin_direction: true,
            clamp_y_to_height: false,
            shape_count: 7,
            color_count: 7,
            pivot: [16.0, 9.0],
            spawn: SpawnPolicy::default(),
            ranges: SpawnRanges::default(),
        }
    }
}

impl LeavesConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML source
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(text)?;
        let config = Self::from_toml(&table)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a LeavesConfig from a TOML table.
    ///
    /// Keys may sit at the top level or inside a `[leaves]` table. Missing
    /// keys keep their defaults; integers are accepted where floats are
    /// expected and vice versa.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let table = table
            .get("leaves")
            .and_then(|v| v.as_table())
            .unwrap_or(table);
        let mut config = Self::default();

        if let Some(v) = table.get("capacity") {
            let n = toml_u64(v, config.capacity as u64) as usize;
            config.capacity = n.min(MAX_CAPACITY);
        }
        if let Some(v) = table.get("fade_in_rate") {
            config.fade_in_rate = toml_f32(v, config.fade_in_rate);
        }
        if let Some(v) = table.get("wobble") {
            config.wobble = v.as_bool().unwrap_or(config.wobble);
        }
        if let Some(v) = table.get("random_spin_direction") {
            config.random_spin_direction = v.as_bool().unwrap_or(config.random_spin_direction);
        }
        if let Some(v) = table.get("clamp_y_to_height") {
            config.clamp_y_to_height = v.as_bool().unwrap_or(config.clamp_y_to_height);
        }
        if let Some(v) = table.get("shape_count") {
            config.shape_count = toml_u64(v, config.shape_count as u64) as u32;
        }
        if let Some(v) = table.get("color_count") {
            config.color_count = toml_u64(v, config.color_count as u64) as u32;
        }
        if let Some(v) = table.get("pivot") {
            config.pivot = toml_vec2(v, config.pivot);
        }

        if let Some(spawn) = table.get("spawn").and_then(|v| v.as_table()) {
            if let Some(v) = spawn.get("mode") {
                config.spawn.mode = SpawnMode::parse(v.as_str().unwrap_or_default())?;
            }
            if let Some(v) = spawn.get("base_ms") {
                config.spawn.base_ms = toml_u64(v, config.spawn.base_ms);
            }
            if let Some(v) = spawn.get("variance_ms") {
                config.spawn.variance_ms = toml_u64(v, config.spawn.variance_ms);
            }
            if let Some(v) = spawn.get("first_ms") {
                config.spawn.first_spawn_ms = toml_u64(v, config.spawn.first_spawn_ms);
            }
        }

        if let Some(ranges) = table.get("ranges").and_then(|v| v.as_table()) {
            let r = &mut config.ranges;
            for (name, slot) in [
                ("x", &mut r.x),
                ("y", &mut r.y),
                ("scale", &mut r.scale),
                ("x_speed", &mut r.x_speed),
                ("y_speed", &mut r.y_speed),
                ("rotation", &mut r.rotation),
                ("rotation_speed", &mut r.rotation_speed),
                ("period", &mut r.period),
                ("amplitude", &mut r.amplitude),
            ] {
                if let Some(v) = ranges.get(name) {
                    *slot = toml_range(v, *slot);
                }
            }
        }

        Ok(config)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<()> {
        if self.capacity > MAX_CAPACITY {
            return Err(MapleError::ValueOutOfRange {
                field: "capacity".into(),
                min: 0.0,
                max: MAX_CAPACITY as f64,
                value: self.capacity as f64,
            });
        }
        if !self.fade_in_rate.is_finite() || self.fade_in_rate < 0.0 {
            return Err(MapleError::ValidationError(format!(
                "fade_in_rate must be a non-negative number, got {}",
                self.fade_in_rate
            )));
        }
        if self.shape_count == 0 || self.color_count == 0 {
            return Err(MapleError::ValidationError(
                "shape_count and color_count must be at least 1".into(),
            ));
        }

        let r = &self.ranges;
        r.x.check("x")?;
        r.y.check("y")?;
        r.scale.check("scale")?;
        r.x_speed.check("x_speed")?;
        r.y_speed.check("y_speed")?;
        r.rotation.check("rotation")?;
        r.rotation_speed.check("rotation_speed")?;
        r.period.check("period")?;
        r.amplitude.check("amplitude")?;

        // Leaves only ever drift rightward; eviction happens at the right edge
        if r.x_speed.min < 0.0 {
            return Err(MapleError::ValidationError(format!(
                "ranges.x_speed must be non-negative, got min {}",
                r.x_speed.min
            )));
        }
        if r.scale.min < 0.0 {
            return Err(MapleError::ValidationError(format!(
                "ranges.scale must be non-negative, got min {}",
                r.scale.min
            )));
        }
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Float output: print f32 values as written, not as their f64 widening ──

/// Shortest decimal that reads back as the same f32, as an f64
fn widen(v: f32) -> f64 {
    v.to_string().parse().unwrap_or(v as f64)
}

fn serialize_f32<S: Serializer>(v: &f32, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(widen(*v))
}

fn serialize_vec2<S: Serializer>(v: &[f32; 2], s: S) -> std::result::Result<S::Ok, S::Error> {
    [widen(v[0]), widen(v[1])].serialize(s)
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_u64(v: &toml::Value, default: u64) -> u64 {
    v.as_integer()
        .map(|i| i.max(0) as u64)
        .or_else(|| v.as_float().map(|f| f.max(0.0) as u64))
        .unwrap_or(default)
}

fn toml_vec2(v: &toml::Value, default: [f32; 2]) -> [f32; 2] {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 2 {
            return [toml_f32(&arr[0], default[0]), toml_f32(&arr[1], default[1])];
        }
    }
    default
}

/// Accepts `[min, max]` or a single number for a fixed value
fn toml_range(v: &toml::Value, default: FloatRange) -> FloatRange {
    if v.is_float() || v.is_integer() {
        return FloatRange::fixed(toml_f32(v, default.min));
    }
    let [min, max] = toml_vec2(v, [default.min, default.max]);
    FloatRange::new(min, max)
}
