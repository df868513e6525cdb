//! Startup device profiling: a weighted hardware score picks the initial
//! quality tier. Missing information always scores low, never errors.

use crate::tier::QualityTier;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GpuClass {
    Discrete,
    Integrated,
    /// GPU info unavailable: scored as low-end rather than failing
    Unknown,
}

/// Detected (or assumed) hardware characteristics
#[derive(Clone, Copy, Debug)]
pub struct DeviceProfile {
    pub gpu: GpuClass,
    pub memory_gb: f32,
    pub logical_cores: u32,
    pub mobile: bool,
}

impl DeviceProfile {
    /// A deliberately pessimistic profile for when detection fails entirely
    pub fn fallback() -> Self {
        Self {
            gpu: GpuClass::Unknown,
            memory_gb: 2.0,
            logical_cores: 2,
            mobile: false,
        }
    }

    /// Weighted hardware score. GPU class dominates; memory and core count
    /// contribute capped linear terms; mobile halves the total.
    pub fn score(&self) -> f32 {
        let gpu = match self.gpu {
            GpuClass::Discrete => 40.0,
            GpuClass::Integrated => 20.0,
            GpuClass::Unknown => 10.0,
        };
        let memory = (self.memory_gb * 2.5).min(40.0);
        let cores = (self.logical_cores as f32 * 1.25).min(20.0);
        let total = gpu + memory + cores;
        if self.mobile {
            total * 0.5
        } else {
            total
        }
    }

    /// Bucket the score into a starting tier
    pub fn initial_tier(&self) -> QualityTier {
        let score = self.score();
        if score >= 80.0 {
            QualityTier::Ultra
        } else if score >= 60.0 {
            QualityTier::High
        } else if score >= 40.0 {
            QualityTier::Medium
        } else if score >= 20.0 {
            QualityTier::Low
        } else {
            QualityTier::Minimal
        }
    }
}
