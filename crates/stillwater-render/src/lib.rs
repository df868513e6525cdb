//! Stillwater Render - the per-frame draw side
//!
//! Packs visible particles into reusable flat attribute buffers, owns the
//! GPU sprite pipelines (additive water sprite plus a flat-color fallback),
//! and drives the fixed per-frame stage order: governor, simulation,
//! culling/LOD, packing, draw.

pub mod buffers;
pub mod renderer;
pub mod sprite;

pub use buffers::AttributeBuffers;
pub use renderer::{LakeRenderer, NullBackend, RenderBackend};
pub use sprite::{SpriteInstance, SpriteUniforms, WaterSpritePipeline};
