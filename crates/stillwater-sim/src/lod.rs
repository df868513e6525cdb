//! Distance-based culling and continuous level-of-detail selection

use crate::particle::Particle;
use crate::rng::SimRng;
use stillwater_core::Vec3;

/// One entry in the distance → detail table
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodBand {
    pub distance: f32,
    pub detail: f32,
}

/// Per-particle verdict from [`ParticleOptimizer::should_render`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderDecision {
    pub should_render: bool,
    pub lod_level: f32,
}

/// Rendering counters accumulated per optimization pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptimizerStats {
    pub rendered: usize,
    pub culled: usize,
    pub skipped: usize,
}

/// Default camera-distance bands, in world units
fn default_bands() -> Vec<LodBand> {
    vec![
        LodBand { distance: 0.0, detail: 1.0 },
        LodBand { distance: 150.0, detail: 0.85 },
        LodBand { distance: 300.0, detail: 0.6 },
        LodBand { distance: 500.0, detail: 0.35 },
        LodBand { distance: 700.0, detail: 0.15 },
    ]
}

pub struct ParticleOptimizer {
    bands: Vec<LodBand>,
    culling_distance: f32,
    /// Configured ceiling the culling distance can recover to
    base_culling_distance: f32,
    /// Shrinking stops here even under sustained poor performance
    min_culling_distance: f32,
    target_fps: f32,
    enabled: bool,
    stats: OptimizerStats,
}

impl ParticleOptimizer {
    pub fn new(culling_distance: f32, target_fps: f32) -> Self {
        Self {
            bands: default_bands(),
            culling_distance,
            base_culling_distance: culling_distance,
            min_culling_distance: culling_distance * 0.3,
            target_fps,
            enabled: true,
            stats: OptimizerStats::default(),
        }
    }

    pub fn with_bands(mut self, bands: Vec<LodBand>) -> Self {
        if !bands.is_empty() {
            self.bands = bands;
        }
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn culling_distance(&self) -> f32 {
        self.culling_distance
    }

    pub fn stats(&self) -> OptimizerStats {
        self.stats
    }

    /// Continuous detail factor for a camera distance.
    ///
    /// Non-increasing in distance; exactly the first band's detail at 0
    /// and the last band's detail beyond the final threshold.
    pub fn lod_for_distance(&self, distance: f32) -> f32 {
        let first = &self.bands[0];
        if distance <= first.distance {
            return first.detail;
        }
        for pair in self.bands.windows(2) {
            let (near, far) = (&pair[0], &pair[1]);
            if distance <= far.distance {
                let span = far.distance - near.distance;
                if span <= 0.0 {
                    return far.detail;
                }
                let t = (distance - near.distance) / span;
                return near.detail + (far.detail - near.detail) * t;
            }
        }
        self.bands[self.bands.len() - 1].detail
    }

    /// Cull-or-LOD verdict for one particle. A detail level below 0.99
    /// is subject to a probabilistic skip proportional to the level, which
    /// thins distant particles smoothly instead of popping at band edges.
    pub fn should_render(&self, particle: &Particle, camera: Vec3, rng: &mut SimRng) -> RenderDecision {
        if !self.enabled {
            return RenderDecision {
                should_render: true,
                lod_level: 1.0,
            };
        }
        let dist_sq = particle.position.distance_squared_2d(&camera);
        if dist_sq > self.culling_distance * self.culling_distance {
            return RenderDecision {
                should_render: false,
                lod_level: 0.0,
            };
        }
        let lod_level = self.lod_for_distance(dist_sq.sqrt());
        if lod_level < 0.99 && rng.next_f32() > lod_level {
            return RenderDecision {
                should_render: false,
                lod_level,
            };
        }
        RenderDecision {
            should_render: true,
            lod_level,
        }
    }

    /// Apply culling and LOD to every particle in a system's live set,
    /// setting visibility flags and display fields on survivors.
    pub fn optimize_system(&mut self, particles: &mut [Particle], camera: Vec3, frame: u64) {
        self.stats = OptimizerStats::default();
        for particle in particles.iter_mut() {
            let mut rng = SimRng::seeded_for(particle.id, frame);
            let decision = self.should_render(particle, camera, &mut rng);
            particle.visible = decision.should_render;
            if decision.should_render {
                particle.set_lod(decision.lod_level);
                self.stats.rendered += 1;
            } else if decision.lod_level == 0.0 {
                self.stats.culled += 1;
            } else {
                self.stats.skipped += 1;
            }
        }
    }

    /// Scale the culling distance relative to its configured base (quality
    /// tier render-distance knob). Bounded below by the adaptation floor.
    pub fn set_distance_factor(&mut self, factor: f32) {
        let scaled = self.base_culling_distance * factor.max(0.0);
        self.culling_distance = scaled.max(self.min_culling_distance);
    }

    /// Hysteretic culling-distance adjustment. Call on a multi-second
    /// cadence, not per-frame: each call moves the distance at most one
    /// bounded 20%-down or 10%-up step.
    pub fn adapt_to_performance(&mut self, fps: f32) {
        let low = self.target_fps * 0.5;
        if fps < low {
            self.enabled = true;
            let shrunk = self.culling_distance * 0.8;
            self.culling_distance = shrunk.max(self.min_culling_distance);
            println!(
                "[lod] fps {fps:.1} below {low:.1}; culling distance now {:.0}",
                self.culling_distance
            );
        } else if fps > self.target_fps * 0.9 {
            let grown = self.culling_distance * 1.1;
            self.culling_distance = grown.min(self.base_culling_distance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillwater_lakes::{LakeCategory, LakeTypeConfig};

    fn optimizer() -> ParticleOptimizer {
        ParticleOptimizer::new(1000.0, 60.0)
    }

    fn particle_at(id: u32, x: f32, y: f32) -> Particle {
        let mut rng = SimRng::new(42);
        let mut p = Particle::dormant(id);
        p.init(
            &mut rng,
            Vec3::ZERO,
            1.0,
            &LakeTypeConfig::for_category(LakeCategory::Freshwater),
        );
        p.position = Vec3::new(x, y, 0.0);
        p
    }

    #[test]
    fn lod_table_endpoints_are_exact() {
        let opt = optimizer();
        assert_eq!(opt.lod_for_distance(0.0), 1.0);
        assert_eq!(opt.lod_for_distance(700.0), 0.15);
        assert_eq!(opt.lod_for_distance(10_000.0), 0.15);
    }

    #[test]
    fn lod_is_non_increasing_in_distance() {
        let opt = optimizer();
        let mut last = f32::INFINITY;
        let mut d = 0.0;
        while d <= 1200.0 {
            let level = opt.lod_for_distance(d);
            assert!(level <= last, "detail rose from {last} to {level} at {d}");
            last = level;
            d += 7.0;
        }
    }

    #[test]
    fn beyond_culling_distance_is_hard_culled() {
        let opt = optimizer();
        let p = particle_at(1, 1500.0, 0.0);
        let mut rng = SimRng::new(1);
        let decision = opt.should_render(&p, Vec3::ZERO, &mut rng);
        assert!(!decision.should_render);
        assert_eq!(decision.lod_level, 0.0);
    }

    #[test]
    fn detail_interpolates_between_bands() {
        let opt = optimizer();
        // Halfway into the first band: 1.0 -> 0.85
        assert!((opt.lod_for_distance(75.0) - 0.925).abs() < 1e-4);
        assert!((opt.lod_for_distance(10.0) - 0.99).abs() < 1e-4);
    }

    #[test]
    fn close_particles_are_never_probabilistically_thinned() {
        let opt = optimizer();
        let p = particle_at(1, 5.0, 0.0);
        let expected = opt.lod_for_distance(5.0);
        assert!(expected > 0.99, "near field sits above the skip threshold");
        let mut rng = SimRng::new(1);
        for _ in 0..100 {
            let decision = opt.should_render(&p, Vec3::ZERO, &mut rng);
            assert!(decision.should_render, "no skip in the near field");
            assert_eq!(decision.lod_level, expected);
        }
    }

    #[test]
    fn distant_particles_are_probabilistically_thinned() {
        let opt = optimizer();
        let p = particle_at(1, 650.0, 0.0);
        let mut rng = SimRng::new(7);
        let mut rendered = 0;
        for _ in 0..1000 {
            if opt.should_render(&p, Vec3::ZERO, &mut rng).should_render {
                rendered += 1;
            }
        }
        let expected = opt.lod_for_distance(650.0);
        let rate = rendered as f32 / 1000.0;
        assert!(
            (rate - expected).abs() < 0.1,
            "render rate {rate} should track detail {expected}"
        );
    }

    #[test]
    fn optimize_system_partitions_counts() {
        let mut opt = optimizer();
        let mut particles: Vec<Particle> = (0..200)
            .map(|i| particle_at(i, (i as f32) * 10.0, 0.0))
            .collect();
        opt.optimize_system(&mut particles, Vec3::ZERO, 1);
        let s = opt.stats();
        assert_eq!(s.rendered + s.culled + s.skipped, 200);
        assert!(s.culled > 0, "particles past 1000 units must be culled");
        let visible = particles.iter().filter(|p| p.visible).count();
        assert_eq!(visible, s.rendered);
    }

    #[test]
    fn adaptation_is_bounded_both_ways() {
        let mut opt = optimizer();
        for _ in 0..50 {
            opt.adapt_to_performance(10.0);
        }
        assert!((opt.culling_distance() - 300.0).abs() < 1.0, "floor at 30%");

        for _ in 0..50 {
            opt.adapt_to_performance(60.0);
        }
        assert!(
            (opt.culling_distance() - 1000.0).abs() < 1.0,
            "recovery capped at the configured distance"
        );
    }

    #[test]
    fn disabled_optimizer_renders_everything() {
        let mut opt = optimizer();
        opt.set_enabled(false);
        let p = particle_at(1, 5000.0, 0.0);
        let mut rng = SimRng::new(1);
        let decision = opt.should_render(&p, Vec3::ZERO, &mut rng);
        assert!(decision.should_render);
        assert_eq!(decision.lod_level, 1.0);
    }
}
