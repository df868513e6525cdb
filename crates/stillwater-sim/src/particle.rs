//! The water particle entity: simulation state plus LOD display fields

use crate::rng::SimRng;
use stillwater_core::{smoothstep, Color, Vec3};
use stillwater_lakes::LakeTypeConfig;

/// Base horizontal speed in world units/s, independent of lake type
const BASE_SPEED: f32 = 6.0;
/// Mild downward pull on the height axis in the fallback integrator
const GRAVITY: f32 = 1.5;
/// Per-frame exponential velocity damping (at 60 Hz)
const DAMPING_PER_FRAME: f32 = 0.98;

/// Particle frozen in place by the freeze boundary policy
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frozen {
    /// Seconds until the particle thaws
    pub remaining: f32,
    /// Velocity to restore (scaled down) on thaw
    pub saved_velocity: Vec3,
}

/// Timed swirl episode applied by the turbulent boundary policy
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swirl {
    /// +1 counter-clockwise, -1 clockwise
    pub direction: f32,
    pub strength: f32,
    /// Seconds left in the episode
    pub remaining: f32,
}

/// One visual water droplet.
///
/// Position lives in world units around the lake center (x/y horizontal,
/// z height above the surface); the screen-space projection is cached per
/// frame for the spatial grid.
#[derive(Clone, Debug)]
pub struct Particle {
    pub id: u32,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds lived; never exceeds lifespan while live
    pub age: f32,
    pub lifespan: f32,
    /// Authoritative size in pixels at LOD 1.0
    pub size: f32,
    pub color: Color,
    /// Opacity recomputed each tick from the lifecycle curve, then scaled
    /// by boundary-policy fades
    pub opacity: f32,
    base_opacity: f32,
    pub glow: f32,
    pub crystalline: bool,
    pub frozen: Option<Frozen>,
    pub swirl: Option<Swirl>,
    /// Continuous LOD factor in [0, 1]
    pub lod: f32,
    pub display_size: f32,
    pub display_opacity: f32,
    pub display_glow: f32,
    pub visible: bool,
    /// Screen projection from the last frame, if any
    pub screen: Option<[f32; 2]>,
    expired: bool,
}

impl Particle {
    /// A pool-ready particle that has never been initialized
    pub fn dormant(id: u32) -> Self {
        Self {
            id,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            age: 0.0,
            lifespan: 0.0,
            size: 0.0,
            color: Color::WHITE,
            opacity: 0.0,
            base_opacity: 0.0,
            glow: 0.0,
            crystalline: false,
            frozen: None,
            swirl: None,
            lod: 1.0,
            display_size: 0.0,
            display_opacity: 0.0,
            display_glow: 0.0,
            visible: false,
            screen: None,
            expired: true,
        }
    }

    /// Seed (or fully re-seed) the particle from lake-type configuration.
    ///
    /// Idempotent: identical post-conditions on a fresh or reused instance.
    pub fn init(&mut self, rng: &mut SimRng, center: Vec3, spawn_radius: f32, config: &LakeTypeConfig) {
        let (dx, dy) = rng.unit_dir_2d();
        let r = rng.range(0.0, spawn_radius);
        self.position = Vec3::new(center.x + dx * r, center.y + dy * r, rng.range(0.0, 2.0));

        let (vx, vy) = rng.unit_dir_2d();
        let speed = BASE_SPEED * rng.range(0.5, 1.0);
        self.velocity = Vec3::new(vx * speed, vy * speed, rng.range(-0.5, 0.5));

        self.lifespan = rng.range(config.lifespan_min, config.lifespan_max);
        self.size = rng.range(config.size_min, config.size_max);
        self.base_opacity = rng.range(0.3, 0.8);
        self.opacity = self.base_opacity;
        self.color = config.base_color;
        self.glow = config.glow_intensity;
        self.age = 0.0;
        self.crystalline = false;
        self.frozen = None;
        self.swirl = None;
        self.expired = false;
        self.visible = true;
        self.screen = None;
        self.set_lod(1.0);
    }

    /// Advance age and run the local fallback integrator.
    ///
    /// Returns false once the particle has expired; expired particles must
    /// not be updated or rendered again until re-initialized. Negative `dt`
    /// contributes nothing.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.expired {
            return false;
        }
        let dt = dt.max(0.0);
        self.age += dt;
        if self.age >= self.lifespan {
            self.expired = true;
            return false;
        }

        if self.frozen.is_none() {
            self.position += self.velocity * dt;
            self.velocity.z -= GRAVITY * dt;
            let damping = DAMPING_PER_FRAME.powf(dt * 60.0);
            self.velocity = self.velocity * damping;
        }

        self.opacity = self.base_opacity * self.lifecycle_fade();
        true
    }

    /// Fade curve over lifecycle progress: eases in over the first 10%,
    /// out over the last 30%, reaching exactly 0 at age == lifespan.
    fn lifecycle_fade(&self) -> f32 {
        if self.lifespan <= 0.0 {
            return 0.0;
        }
        let t = (self.age / self.lifespan).clamp(0.0, 1.0);
        smoothstep(0.0, 0.1, t) * (1.0 - smoothstep(0.7, 1.0, t))
    }

    /// Scale opacity in place (boundary fades); clamped to [0, 1]
    pub fn fade(&mut self, factor: f32) {
        self.opacity = (self.opacity * factor).clamp(0.0, 1.0);
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Force expiry (system trim / disposal)
    pub fn expire(&mut self) {
        self.expired = true;
    }

    /// Return to pool-ready state. Clears every type-specific flag and any
    /// cached projection so no state leaks across lakes.
    pub fn reset(&mut self) {
        let id = self.id;
        *self = Particle::dormant(id);
    }

    /// Store display-only LOD fields without touching authoritative state.
    ///
    /// Fully reversible: `set_lod(1.0)` restores display == authoritative.
    pub fn set_lod(&mut self, level: f32) {
        let level = level.clamp(0.0, 1.0);
        self.lod = level;
        self.display_size = self.size * level;
        // Boost opacity at low LOD so sparse distant particles stay visible
        self.display_opacity = (self.opacity * (1.0 + (1.0 - level) * 0.5)).min(1.0);
        self.display_glow = if level < 0.3 { 0.0 } else { self.glow * level };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillwater_lakes::{LakeCategory, LakeTypeConfig};

    fn config() -> LakeTypeConfig {
        LakeTypeConfig::for_category(LakeCategory::Freshwater)
    }

    fn live_particle(seed: u32) -> Particle {
        let mut rng = SimRng::new(seed);
        let mut p = Particle::dormant(1);
        p.init(&mut rng, Vec3::ZERO, 50.0, &config());
        p
    }

    #[test]
    fn init_postconditions() {
        let config = config();
        let p = live_particle(42);
        assert_eq!(p.age, 0.0);
        assert!(!p.is_expired());
        assert!(p.lifespan >= config.lifespan_min && p.lifespan <= config.lifespan_max);
        assert!(p.size >= config.size_min && p.size <= config.size_max);
        assert!(p.opacity >= 0.3 && p.opacity <= 0.8);
        assert!(p.frozen.is_none());
        assert!(p.swirl.is_none());
        assert!(!p.crystalline);
    }

    #[test]
    fn age_is_monotone_and_expiry_exact() {
        let mut p = live_particle(7);
        p.lifespan = 0.1;
        let mut last_age = 0.0;
        let mut ticks = 0;
        while p.update(0.016) {
            assert!(p.age > last_age);
            assert!(p.age < p.lifespan, "must not report live past lifespan");
            last_age = p.age;
            ticks += 1;
        }
        // Expired exactly on the tick where age first reached lifespan
        assert!(p.is_expired());
        assert!(p.age >= p.lifespan);
        assert_eq!(ticks, 6); // 7th tick crosses 0.112 >= 0.1
        // Further updates are refused
        assert!(!p.update(0.016));
    }

    #[test]
    fn zero_lifespan_expires_on_first_update() {
        let mut p = live_particle(9);
        p.lifespan = 0.0;
        assert!(!p.update(0.016));
        assert!(p.is_expired());
    }

    #[test]
    fn negative_dt_does_not_rewind_age() {
        let mut p = live_particle(11);
        p.update(0.1);
        let age = p.age;
        p.update(-5.0);
        assert!(p.age >= age);
    }

    #[test]
    fn opacity_fades_to_zero_at_end_of_life() {
        let mut p = live_particle(13);
        p.lifespan = 1.0;
        p.age = 0.5;
        assert!(p.lifecycle_fade() > 0.9);
        p.age = 0.999;
        let near_end = p.lifecycle_fade();
        assert!(near_end < 0.05);
        p.age = 1.0;
        assert_eq!(p.lifecycle_fade(), 0.0);
    }

    #[test]
    fn frozen_particle_does_not_move() {
        let mut p = live_particle(17);
        p.frozen = Some(Frozen {
            remaining: 3.0,
            saved_velocity: p.velocity,
        });
        let pos = p.position;
        p.update(0.016);
        assert_eq!(p.position, pos);
    }

    #[test]
    fn reset_then_init_depends_only_on_init_inputs() {
        let mut rng_a = SimRng::new(99);
        let mut rng_b = SimRng::new(99);
        let config = config();

        let mut fresh = Particle::dormant(5);
        fresh.init(&mut rng_a, Vec3::ZERO, 50.0, &config);

        let mut used = Particle::dormant(5);
        used.init(&mut SimRng::new(1), Vec3::new(9.0, 9.0, 9.0), 10.0, &config);
        used.crystalline = true;
        used.frozen = Some(Frozen {
            remaining: 4.0,
            saved_velocity: Vec3::new(1.0, 2.0, 3.0),
        });
        for _ in 0..10 {
            used.update(0.016);
        }
        used.reset();
        used.init(&mut rng_b, Vec3::ZERO, 50.0, &config);

        assert_eq!(fresh.position, used.position);
        assert_eq!(fresh.velocity, used.velocity);
        assert_eq!(fresh.size, used.size);
        assert_eq!(fresh.lifespan, used.lifespan);
        assert_eq!(fresh.opacity, used.opacity);
        assert_eq!(fresh.frozen, used.frozen);
        assert!(!used.crystalline);
    }

    #[test]
    fn lod_is_non_destructive_and_reversible() {
        let mut p = live_particle(23);
        let size = p.size;
        let opacity = p.opacity;

        p.set_lod(0.5);
        assert_eq!(p.size, size);
        assert_eq!(p.opacity, opacity);
        assert!((p.display_size - size * 0.5).abs() < 1e-6);
        assert!(p.display_opacity >= opacity);

        p.set_lod(0.2);
        assert_eq!(p.display_glow, 0.0, "glow suppressed below 0.3");

        p.set_lod(1.0);
        assert!((p.display_size - size).abs() < 1e-6);
        assert!((p.display_opacity - opacity).abs() < 1e-6);
        assert!((p.display_glow - p.glow).abs() < 1e-6);
    }
}
