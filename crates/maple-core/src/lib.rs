//! Maple Core - Foundational types for the Maple leaf simulation
//!
//! This crate provides the core types that all other Maple crates depend on:
//! - `LeafId` - Stable leaf slot identifiers
//! - `AssetId` - Opaque references to host-registered shapes and colors
//! - `Viewport`, `Color` - Layout and visual types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{MapleError, Result};
pub use id::{AssetId, LeafId};
pub use types::{Color, Viewport};
