//! Stillwater Sim - the particle simulation core
//!
//! Provides pooled per-lake particle simulation with:
//! - CPU-side position/velocity/lifetime integration
//! - Free-list particle pool bounding allocation under churn
//! - Flow patterns and five boundary-condition policies per lake type
//! - A grid fluid solver (advect/diffuse/project) for high-fidelity flow
//! - Screen-space spatial partitioning and distance-band LOD

pub mod flow;
pub mod fluid;
pub mod lod;
pub mod particle;
pub mod pool;
pub mod rng;
pub mod spatial;
pub mod system;

pub use flow::{DomainBounds, EffectKind, FlowEffect, FlowField};
pub use fluid::FluidGrid;
pub use lod::{LodBand, ParticleOptimizer, RenderDecision};
pub use particle::Particle;
pub use pool::ParticlePool;
pub use rng::SimRng;
pub use spatial::{ScreenBounds, SpatialGrid};
pub use system::LakeParticles;
