//! Per-category particle configuration and lake site records

use crate::category::{BoundaryPolicy, FlowPatternKind, LakeCategory};
use serde::{Deserialize, Serialize};
use stillwater_core::Color;

/// Particle configuration derived from a lake category.
///
/// Lifespans are in seconds, sizes in screen pixels at LOD 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LakeTypeConfig {
    pub particle_count: usize,
    pub size_min: f32,
    pub size_max: f32,
    pub lifespan_min: f32,
    pub lifespan_max: f32,
    pub glow_intensity: f32,
    pub base_color: Color,
    pub pulse_frequency: f32,
    pub flow_pattern: FlowPatternKind,
    pub boundary: BoundaryPolicy,
}

impl LakeTypeConfig {
    /// Built-in presets per category
    pub fn for_category(category: LakeCategory) -> Self {
        match category {
            LakeCategory::Freshwater => Self {
                particle_count: 1000,
                size_min: 1.5,
                size_max: 4.0,
                lifespan_min: 3.0,
                lifespan_max: 4.5,
                glow_intensity: 0.4,
                base_color: Color::from_hex(0x4FC3F7),
                pulse_frequency: 0.5,
                flow_pattern: FlowPatternKind::Drift,
                boundary: BoundaryPolicy::Reflect,
            },
            LakeCategory::Salt => Self {
                particle_count: 700,
                size_min: 2.0,
                size_max: 5.0,
                lifespan_min: 4.0,
                lifespan_max: 6.0,
                glow_intensity: 0.6,
                base_color: Color::from_hex(0xB2EBF2),
                pulse_frequency: 0.2,
                flow_pattern: FlowPatternKind::Tidal,
                boundary: BoundaryPolicy::Absorb,
            },
            LakeCategory::HighAltitude => Self {
                particle_count: 600,
                size_min: 1.0,
                size_max: 3.0,
                lifespan_min: 5.0,
                lifespan_max: 8.0,
                glow_intensity: 0.8,
                base_color: Color::from_hex(0x81D4FA),
                pulse_frequency: 0.15,
                flow_pattern: FlowPatternKind::Still,
                boundary: BoundaryPolicy::Freeze,
            },
            LakeCategory::Sacred => Self {
                particle_count: 900,
                size_min: 1.5,
                size_max: 4.5,
                lifespan_min: 4.0,
                lifespan_max: 7.0,
                glow_intensity: 1.0,
                base_color: Color::from_hex(0xCE93D8),
                pulse_frequency: 0.8,
                flow_pattern: FlowPatternKind::Spiral,
                boundary: BoundaryPolicy::Orbit,
            },
            LakeCategory::Brackish => Self {
                particle_count: 800,
                size_min: 1.5,
                size_max: 4.0,
                lifespan_min: 3.0,
                lifespan_max: 5.0,
                glow_intensity: 0.3,
                base_color: Color::from_hex(0x80CBC4),
                pulse_frequency: 0.4,
                flow_pattern: FlowPatternKind::Shear,
                boundary: BoundaryPolicy::Turbulent,
            },
            LakeCategory::Urban => Self {
                particle_count: 500,
                size_min: 1.0,
                size_max: 3.0,
                lifespan_min: 2.0,
                lifespan_max: 3.5,
                glow_intensity: 0.5,
                base_color: Color::from_hex(0x90CAF9),
                pulse_frequency: 1.0,
                flow_pattern: FlowPatternKind::Chop,
                boundary: BoundaryPolicy::Reflect,
            },
        }
    }
}

impl Default for LakeTypeConfig {
    fn default() -> Self {
        Self::for_category(LakeCategory::Freshwater)
    }
}

/// One lake entry from site data: where the camera goes and what kind of
/// water lives there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LakeSite {
    pub title: String,
    /// Geographic center, degrees
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub bearing: f64,
    #[serde(default)]
    pub pitch: f64,
    /// Free-text water type, normalized via LakeCategory::from_label
    #[serde(default, rename = "type")]
    pub type_label: String,
    /// Camera fly-to duration, seconds
    #[serde(default = "default_transition")]
    pub transition_duration: f32,
}

fn default_zoom() -> f64 {
    11.0
}

fn default_transition() -> f32 {
    2.5
}

impl LakeSite {
    pub fn category(&self) -> LakeCategory {
        LakeCategory::from_label(&self.type_label)
    }

    pub fn type_config(&self) -> LakeTypeConfig {
        LakeTypeConfig::for_category(self.category())
    }
}
