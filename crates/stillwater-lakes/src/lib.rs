//! Stillwater Lakes - lake metadata and per-type particle configuration
//!
//! The configuration boundary of the visualization: maps free-text lake
//! descriptions onto a fixed category set, and categories onto the particle
//! counts, colors, lifespans, and flow behavior the simulation consumes.

mod category;
mod config;
mod registry;

pub use category::{BoundaryPolicy, FlowPatternKind, LakeCategory};
pub use config::{LakeSite, LakeTypeConfig};
pub use registry::LakeRegistry;
