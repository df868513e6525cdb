//! Per-frame system trait

use crate::context::VizContext;
use stillwater_core::Result;

/// A subsystem ticked by the frame loop.
///
/// Systems are updated in registration order, after the quality governor's
/// transition tick and before the optimizer/renderer stages.
pub trait WaterSystem {
    /// Called once when the system is first registered
    fn initialize(&mut self, ctx: &mut VizContext) -> Result<()>;

    /// Called once per frame with the clamped frame delta
    fn update(&mut self, ctx: &mut VizContext, dt: f32) -> Result<()>;

    /// Called when the system is being shut down. Must be idempotent.
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
