//! Stillwater Core - Foundational types for the lake visualization
//!
//! This crate provides the types that all other Stillwater crates depend on:
//! - `LakeId` - Stable lake identifiers
//! - `Vec3`, `Color` - Spatial and color types
//! - Lerp/smoothstep curves
//! - Error types and Result alias

mod curves;
mod error;
mod id;
mod types;

pub use curves::{lerp_color, lerp_f32, smoothstep};
pub use error::{Result, StillwaterError};
pub use id::LakeId;
pub use types::{Color, Vec3};
