//! Read-only performance metrics exposed for display

use stillwater_quality::QualityTier;

/// One frame's diagnostic snapshot. Cheap to copy; consumers must not
/// write back through it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    pub fps: f32,
    pub particle_count: usize,
    pub visible_count: usize,
    pub culled_count: usize,
    pub pool_reuse_ratio: f32,
    pub tier: QualityTier,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            particle_count: 0,
            visible_count: 0,
            culled_count: 0,
            pool_reuse_ratio: 0.0,
            tier: QualityTier::Medium,
        }
    }
}
