//! Per-tier settings records and transition interpolation

use crate::tier::QualityTier;
use serde::{Deserialize, Serialize};
use stillwater_core::lerp_f32;

/// The fidelity knobs a tier bundles together.
///
/// Numeric fields interpolate smoothly during tier transitions; boolean
/// fields switch at the halfway point of the transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualitySettings {
    /// Scales every lake's configured particle count
    pub particle_multiplier: f32,
    pub max_particles: u32,
    /// Backbuffer scale relative to the viewport
    pub render_scale: f32,
    /// Abstract effect/animation complexity in [0, 1]
    pub effect_complexity: f32,
    pub glow: bool,
    pub post_processing: bool,
    pub physics_iterations: u32,
    /// Scales the optimizer's culling distance
    pub render_distance_factor: f32,
}

impl QualitySettings {
    pub fn for_tier(tier: QualityTier) -> Self {
        match tier {
            QualityTier::Minimal => Self {
                particle_multiplier: 0.2,
                max_particles: 300,
                render_scale: 0.5,
                effect_complexity: 0.1,
                glow: false,
                post_processing: false,
                physics_iterations: 1,
                render_distance_factor: 0.4,
            },
            QualityTier::Low => Self {
                particle_multiplier: 0.4,
                max_particles: 800,
                render_scale: 0.65,
                effect_complexity: 0.3,
                glow: false,
                post_processing: false,
                physics_iterations: 2,
                render_distance_factor: 0.6,
            },
            QualityTier::Medium => Self {
                particle_multiplier: 0.7,
                max_particles: 1500,
                render_scale: 0.8,
                effect_complexity: 0.6,
                glow: true,
                post_processing: false,
                physics_iterations: 3,
                render_distance_factor: 0.8,
            },
            QualityTier::High => Self {
                particle_multiplier: 1.0,
                max_particles: 3000,
                render_scale: 1.0,
                effect_complexity: 0.85,
                glow: true,
                post_processing: true,
                physics_iterations: 4,
                render_distance_factor: 1.0,
            },
            QualityTier::Ultra => Self {
                particle_multiplier: 1.3,
                max_particles: 5000,
                render_scale: 1.0,
                effect_complexity: 1.0,
                glow: true,
                post_processing: true,
                physics_iterations: 6,
                render_distance_factor: 1.2,
            },
        }
    }

    /// Interpolate between two tiers' settings.
    ///
    /// `t >= 1` snaps exactly to `to` (no floating-point residue at the end
    /// of a transition); booleans flip once `t` crosses 0.5.
    pub fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        if t >= 1.0 {
            return *to;
        }
        let t = t.max(0.0);
        let switched = t > 0.5;
        Self {
            particle_multiplier: lerp_f32(from.particle_multiplier, to.particle_multiplier, t),
            max_particles: lerp_f32(from.max_particles as f32, to.max_particles as f32, t).round()
                as u32,
            render_scale: lerp_f32(from.render_scale, to.render_scale, t),
            effect_complexity: lerp_f32(from.effect_complexity, to.effect_complexity, t),
            glow: if switched { to.glow } else { from.glow },
            post_processing: if switched {
                to.post_processing
            } else {
                from.post_processing
            },
            physics_iterations: lerp_f32(
                from.physics_iterations as f32,
                to.physics_iterations as f32,
                t,
            )
            .round() as u32,
            render_distance_factor: lerp_f32(
                from.render_distance_factor,
                to.render_distance_factor,
                t,
            ),
        }
    }
}
