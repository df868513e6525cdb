//! Flow controller: per-lake velocity patterns and boundary-condition
//! policies applied to particles in place.

use crate::fluid::FluidGrid;
use crate::particle::{Frozen, Particle, Swirl};
use crate::rng::SimRng;
use std::collections::HashMap;
use stillwater_core::{LakeId, Result, StillwaterError, Vec3};
use stillwater_lakes::{BoundaryPolicy, FlowPatternKind};

/// Restitution applied to the velocity component flipped by a reflect
const REFLECT_RESTITUTION: f32 = 0.7;
/// Margin band width as a fraction of the domain's smaller extent
const MARGIN_FRACTION: f32 = 0.1;
/// Per-frame probability of a freeze taking hold inside the margin
const FREEZE_CHANCE: f32 = 0.02;
/// Per-frame probability of a turbulent swirl episode starting
const SWIRL_CHANCE: f32 = 0.005;
/// How strongly the pattern velocity steers the particle per second
const PATTERN_BLEND: f32 = 1.5;

/// Axis-aligned simulation domain for one lake, in world units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl DomainBounds {
    pub fn centered(center: Vec3, half_width: f32, half_height: f32) -> Self {
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
            0.0,
        )
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Distance to the nearest edge, negative outside the domain.
    ///
    /// Scans left, right, top, bottom in that order and keeps the first
    /// minimum, so equidistant edges resolve consistently.
    pub fn nearest_edge_distance(&self, x: f32, y: f32) -> f32 {
        let distances = [
            x - self.min_x,
            self.max_x - x,
            y - self.min_y,
            self.max_y - y,
        ];
        let mut nearest = distances[0];
        for &d in &distances[1..] {
            if d < nearest {
                nearest = d;
            }
        }
        nearest
    }

    /// Half-diagonal: the largest distance from center to a corner
    pub fn max_corner_distance(&self) -> f32 {
        let hw = self.width() * 0.5;
        let hh = self.height() * 0.5;
        (hw * hw + hh * hh).sqrt()
    }

    fn margin(&self) -> f32 {
        self.width().min(self.height()) * MARGIN_FRACTION
    }
}

/// Fire-and-forget visual effect notification for the rendering layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowEffect {
    pub kind: EffectKind,
    pub strength: f32,
    /// Seconds the rendering layer should play the effect for
    pub duration: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Ripple,
    FreezeFlash,
    Thaw,
    OrbitPulse,
    SwirlBurst,
}

/// A velocity-field pattern: world position + lake center + time → flow
pub type PatternFn = fn(x: f32, y: f32, center: Vec3, time: f32) -> (f32, f32);

/// Maps lake types to velocity fields and enforces domain boundaries.
///
/// Patterns are a function table keyed by the closed [`FlowPatternKind`]
/// enum; registering over an existing kind overwrites it (last write wins).
pub struct FlowField {
    patterns: HashMap<FlowPatternKind, PatternFn>,
    active: HashMap<LakeId, FlowPatternKind>,
    effects: Vec<FlowEffect>,
    frame: u64,
}

impl FlowField {
    /// A flow field with all built-in patterns installed
    pub fn new() -> Self {
        let mut field = Self {
            patterns: HashMap::new(),
            active: HashMap::new(),
            effects: Vec::new(),
            frame: 0,
        };
        field.register_pattern(FlowPatternKind::Drift, patterns::drift);
        field.register_pattern(FlowPatternKind::Tidal, patterns::tidal);
        field.register_pattern(FlowPatternKind::Spiral, patterns::spiral);
        field.register_pattern(FlowPatternKind::Still, patterns::still);
        field.register_pattern(FlowPatternKind::Shear, patterns::shear);
        field.register_pattern(FlowPatternKind::Chop, patterns::chop);
        field
    }

    /// Install (or overwrite) a pattern function
    pub fn register_pattern(&mut self, kind: FlowPatternKind, f: PatternFn) {
        self.patterns.insert(kind, f);
    }

    /// Select the pattern a lake's particles follow. Unregistered kinds are
    /// rejected and leave the previous selection in place.
    pub fn set_active_pattern(&mut self, lake: LakeId, kind: FlowPatternKind) -> Result<()> {
        if !self.patterns.contains_key(&kind) {
            eprintln!("[flow] pattern {kind:?} not registered; keeping previous for lake {lake}");
            return Err(StillwaterError::UnregisteredFlowPattern(format!(
                "{kind:?}"
            )));
        }
        self.active.insert(lake, kind);
        Ok(())
    }

    pub fn active_pattern(&self, lake: LakeId) -> Option<FlowPatternKind> {
        self.active.get(&lake).copied()
    }

    /// Advance the frame counter used for identity-seeded randomness.
    /// Call once per simulation tick.
    pub fn advance_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Steer a particle toward its lake's pattern velocity, optionally
    /// blending in the fluid grid's sampled velocity.
    pub fn apply_flow(
        &self,
        particle: &mut Particle,
        lake: LakeId,
        center: Vec3,
        time: f32,
        dt: f32,
        fluid: Option<&FluidGrid>,
    ) {
        if particle.frozen.is_some() {
            return;
        }
        let Some(kind) = self.active.get(&lake) else {
            return;
        };
        let Some(pattern) = self.patterns.get(kind) else {
            return;
        };

        let (mut fx, mut fy) = pattern(particle.position.x, particle.position.y, center, time);
        if let Some(grid) = fluid {
            let (gx, gy) = grid.sample_velocity(particle.position.x, particle.position.y);
            fx += gx;
            fy += gy;
        }

        let blend = (PATTERN_BLEND * dt).min(1.0);
        particle.velocity.x += (fx - particle.velocity.x) * blend;
        particle.velocity.y += (fy - particle.velocity.y) * blend;
    }

    /// Enforce the lake's boundary policy on one particle.
    ///
    /// Mutates velocity/position/opacity/flags in place and may queue
    /// fire-and-forget [`FlowEffect`]s for the rendering layer.
    pub fn apply_boundary(
        &mut self,
        particle: &mut Particle,
        bounds: &DomainBounds,
        policy: BoundaryPolicy,
        dt: f32,
    ) {
        let mut rng = SimRng::seeded_for(particle.id, self.frame);
        match policy {
            BoundaryPolicy::Reflect => self.reflect(particle, bounds),
            BoundaryPolicy::Absorb => self.absorb(particle, bounds, &mut rng),
            BoundaryPolicy::Freeze => self.freeze(particle, bounds, &mut rng, dt),
            BoundaryPolicy::Orbit => self.orbit(particle, bounds, &mut rng, dt),
            BoundaryPolicy::Turbulent => self.turbulent(particle, bounds, &mut rng, dt),
        }
    }

    /// Drain queued visual effects (consumed by the renderer once per frame)
    pub fn drain_effects(&mut self) -> Vec<FlowEffect> {
        std::mem::take(&mut self.effects)
    }

    fn push_effect(&mut self, kind: EffectKind, strength: f32, duration: f32) {
        self.effects.push(FlowEffect {
            kind,
            strength,
            duration,
        });
    }

    fn reflect(&mut self, p: &mut Particle, bounds: &DomainBounds) {
        let mut bounced = false;
        if p.position.x < bounds.min_x {
            p.position.x = bounds.min_x;
            p.velocity.x = -p.velocity.x * REFLECT_RESTITUTION;
            bounced = true;
        } else if p.position.x > bounds.max_x {
            p.position.x = bounds.max_x;
            p.velocity.x = -p.velocity.x * REFLECT_RESTITUTION;
            bounced = true;
        }
        if p.position.y < bounds.min_y {
            p.position.y = bounds.min_y;
            p.velocity.y = -p.velocity.y * REFLECT_RESTITUTION;
            bounced = true;
        } else if p.position.y > bounds.max_y {
            p.position.y = bounds.max_y;
            p.velocity.y = -p.velocity.y * REFLECT_RESTITUTION;
            bounced = true;
        }
        if bounced {
            let strength = p.velocity.length() / 10.0;
            self.push_effect(EffectKind::Ripple, strength.min(1.0), 0.5);
        }
    }

    fn absorb(&mut self, p: &mut Particle, bounds: &DomainBounds, rng: &mut SimRng) {
        if !bounds.contains(p.position.x, p.position.y) {
            // Fully outside: respawn at a fresh interior position
            let center = bounds.center();
            let (dx, dy) = rng.unit_dir_2d();
            let r = rng.range(0.0, 0.6) * bounds.max_corner_distance() * 0.7;
            p.position.x = center.x + dx * r;
            p.position.y = center.y + dy * r;
            let (vx, vy) = rng.unit_dir_2d();
            let speed = rng.range(2.0, 6.0);
            p.velocity = Vec3::new(vx * speed, vy * speed, p.velocity.z);
            return;
        }
        let margin = bounds.margin();
        let d = bounds.nearest_edge_distance(p.position.x, p.position.y);
        if d < margin {
            let depth = (d / margin).clamp(0.0, 1.0);
            // Progressive slow-down and fade as the edge approaches
            let slow = 0.95 + 0.05 * depth;
            p.velocity.x *= slow;
            p.velocity.y *= slow;
            p.fade(0.9 + 0.1 * depth);
        }
    }

    fn freeze(&mut self, p: &mut Particle, bounds: &DomainBounds, rng: &mut SimRng, dt: f32) {
        if let Some(mut frozen) = p.frozen {
            frozen.remaining -= dt.max(0.0);
            if frozen.remaining <= 0.0 {
                // Thaw: restore a scaled-down version of the saved velocity
                p.velocity = frozen.saved_velocity * 0.5;
                p.frozen = None;
                p.crystalline = false;
                self.push_effect(EffectKind::Thaw, 0.5, 0.8);
            } else {
                p.frozen = Some(frozen);
            }
            return;
        }

        let margin = bounds.margin();
        let d = bounds.nearest_edge_distance(p.position.x, p.position.y);
        if d < margin {
            p.velocity.x *= 0.9;
            p.velocity.y *= 0.9;
            if rng.chance(FREEZE_CHANCE) {
                p.frozen = Some(Frozen {
                    remaining: rng.range(2.0, 5.0),
                    saved_velocity: p.velocity,
                });
                p.velocity = Vec3::ZERO;
                p.crystalline = true;
                self.push_effect(EffectKind::FreezeFlash, 1.0, 0.4);
            }
        }
        // Clamp so frozen crystals never drift out of the domain
        p.position.x = p.position.x.clamp(bounds.min_x, bounds.max_x);
        p.position.y = p.position.y.clamp(bounds.min_y, bounds.max_y);
    }

    fn orbit(&mut self, p: &mut Particle, bounds: &DomainBounds, rng: &mut SimRng, dt: f32) {
        let center = bounds.center();
        let rx = p.position.x - center.x;
        let ry = p.position.y - center.y;
        let r = (rx * rx + ry * ry).sqrt();
        let threshold = bounds.max_corner_distance() * 0.8;
        if r <= threshold || r <= f32::EPSILON {
            return;
        }
        // Tangential push circles the particle around the center;
        // a weak centripetal pull keeps it from escaping
        let inv = 1.0 / r;
        let (nx, ny) = (rx * inv, ry * inv);
        let tangential_strength = 12.0;
        let centripetal_strength = 4.0;
        p.velocity.x += (-ny * tangential_strength - nx * centripetal_strength) * dt;
        p.velocity.y += (nx * tangential_strength - ny * centripetal_strength) * dt;
        if rng.chance(0.01) {
            self.push_effect(EffectKind::OrbitPulse, 0.6, 1.0);
        }
    }

    fn turbulent(&mut self, p: &mut Particle, bounds: &DomainBounds, rng: &mut SimRng, dt: f32) {
        if let Some(mut swirl) = p.swirl {
            swirl.remaining -= dt.max(0.0);
            if swirl.remaining <= 0.0 {
                p.swirl = None;
            } else {
                // Rotating force around the lake center
                let center = bounds.center();
                let rx = p.position.x - center.x;
                let ry = p.position.y - center.y;
                let r = (rx * rx + ry * ry).sqrt().max(1e-3);
                p.velocity.x += -ry / r * swirl.strength * swirl.direction * dt;
                p.velocity.y += rx / r * swirl.strength * swirl.direction * dt;
                p.swirl = Some(swirl);
            }
        }

        let margin = bounds.margin();
        let d = bounds.nearest_edge_distance(p.position.x, p.position.y);
        if d < margin {
            let jitter = 4.0;
            p.velocity.x += rng.range(-jitter, jitter) * dt * 60.0 * 0.1;
            p.velocity.y += rng.range(-jitter, jitter) * dt * 60.0 * 0.1;
        }
        if p.swirl.is_none() && rng.chance(SWIRL_CHANCE) {
            let direction = if rng.chance(0.5) { 1.0 } else { -1.0 };
            let strength = rng.range(8.0, 16.0);
            p.swirl = Some(Swirl {
                direction,
                strength,
                remaining: rng.range(1.0, 2.0),
            });
            self.push_effect(EffectKind::SwirlBurst, strength / 16.0, 1.5);
        }
        // Keep turbulence inside the box
        p.position.x = p.position.x.clamp(bounds.min_x, bounds.max_x);
        p.position.y = p.position.y.clamp(bounds.min_y, bounds.max_y);
    }
}

impl Default for FlowField {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in velocity-field patterns, one per lake category
mod patterns {
    use stillwater_core::Vec3;

    /// Gentle meandering drift
    pub fn drift(x: f32, y: f32, _center: Vec3, time: f32) -> (f32, f32) {
        let fx = (y * 0.05 + time * 0.3).sin() * 3.0;
        let fy = (x * 0.05 + time * 0.2).cos() * 3.0;
        (fx, fy)
    }

    /// Slow push-pull along one axis
    pub fn tidal(_x: f32, y: f32, _center: Vec3, time: f32) -> (f32, f32) {
        let phase = (time * 0.25).sin();
        (phase * 4.0, (y * 0.02).sin() * phase * 0.5)
    }

    /// Inward spiral around the lake center
    pub fn spiral(x: f32, y: f32, center: Vec3, _time: f32) -> (f32, f32) {
        let rx = x - center.x;
        let ry = y - center.y;
        let r = (rx * rx + ry * ry).sqrt().max(1e-3);
        let tangential = 5.0;
        let inward = 0.8;
        (
            -ry / r * tangential - rx / r * inward,
            rx / r * tangential - ry / r * inward,
        )
    }

    /// Near-still water with faint convection
    pub fn still(x: f32, y: f32, _center: Vec3, time: f32) -> (f32, f32) {
        (
            (y * 0.1 + time * 0.1).sin() * 0.4,
            (x * 0.1 - time * 0.1).cos() * 0.4,
        )
    }

    /// Layered shear: opposite flow above and below the centerline
    pub fn shear(_x: f32, y: f32, center: Vec3, time: f32) -> (f32, f32) {
        let side = if y > center.y { 1.0 } else { -1.0 };
        (side * 3.0, (time * 0.5 + y * 0.08).sin() * 1.0)
    }

    /// Short choppy oscillations
    pub fn chop(x: f32, y: f32, _center: Vec3, time: f32) -> (f32, f32) {
        (
            (x * 0.3 + time * 2.0).sin() * 2.5,
            (y * 0.3 + time * 1.7).cos() * 2.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillwater_lakes::{LakeCategory, LakeTypeConfig};

    fn bounds() -> DomainBounds {
        DomainBounds::centered(Vec3::ZERO, 100.0, 100.0)
    }

    fn live_particle() -> Particle {
        let mut rng = SimRng::new(42);
        let mut p = Particle::dormant(1);
        p.init(
            &mut rng,
            Vec3::ZERO,
            50.0,
            &LakeTypeConfig::for_category(LakeCategory::Freshwater),
        );
        p
    }

    #[test]
    fn nearest_edge_distance_signed() {
        let b = bounds();
        assert!((b.nearest_edge_distance(0.0, 0.0) - 100.0).abs() < 1e-6);
        assert!((b.nearest_edge_distance(95.0, 0.0) - 5.0).abs() < 1e-6);
        assert!(b.nearest_edge_distance(105.0, 0.0) < 0.0, "outside is negative");
    }

    #[test]
    fn set_active_pattern_rejects_unregistered() {
        let mut field = FlowField::new();
        let lake = LakeId::from_raw(1);
        field.patterns.remove(&FlowPatternKind::Chop);
        assert!(field.set_active_pattern(lake, FlowPatternKind::Chop).is_err());
        assert_eq!(field.active_pattern(lake), None, "prior state preserved");

        assert!(field.set_active_pattern(lake, FlowPatternKind::Drift).is_ok());
        assert_eq!(field.active_pattern(lake), Some(FlowPatternKind::Drift));
    }

    #[test]
    fn register_pattern_last_write_wins() {
        fn zero(_: f32, _: f32, _: Vec3, _: f32) -> (f32, f32) {
            (0.0, 0.0)
        }
        let mut field = FlowField::new();
        field.register_pattern(FlowPatternKind::Drift, zero);
        let f = field.patterns[&FlowPatternKind::Drift];
        assert_eq!(f(1.0, 2.0, Vec3::ZERO, 3.0), (0.0, 0.0));
    }

    #[test]
    fn reflect_flips_velocity_and_clamps() {
        let mut field = FlowField::new();
        let mut p = live_particle();
        p.position = Vec3::new(105.0, 0.0, 0.0);
        p.velocity = Vec3::new(10.0, 0.0, 0.0);
        field.apply_boundary(&mut p, &bounds(), BoundaryPolicy::Reflect, 0.016);
        assert_eq!(p.position.x, 100.0);
        assert!((p.velocity.x + 10.0 * REFLECT_RESTITUTION).abs() < 1e-6);
        let effects = field.drain_effects();
        assert!(effects.iter().any(|e| e.kind == EffectKind::Ripple));
    }

    #[test]
    fn absorb_respawns_outside_particles_inside() {
        let mut field = FlowField::new();
        let mut p = live_particle();
        p.position = Vec3::new(300.0, 300.0, 0.0);
        field.apply_boundary(&mut p, &bounds(), BoundaryPolicy::Absorb, 0.016);
        assert!(bounds().contains(p.position.x, p.position.y));
    }

    #[test]
    fn absorb_fades_in_margin_band() {
        let mut field = FlowField::new();
        let mut p = live_particle();
        p.position = Vec3::new(95.0, 0.0, 0.0); // margin is 20 units
        let opacity = p.opacity;
        let speed = p.velocity.length();
        field.apply_boundary(&mut p, &bounds(), BoundaryPolicy::Absorb, 0.016);
        assert!(p.opacity < opacity);
        assert!(p.velocity.length() < speed);
    }

    #[test]
    fn freeze_eventually_stops_then_thaws() {
        let mut field = FlowField::new();
        let mut p = live_particle();
        p.position = Vec3::new(98.0, 0.0, 0.0);
        p.velocity = Vec3::new(5.0, 0.0, 0.0);

        // Drive frames until the identity-seeded chance fires
        let mut froze = false;
        for _ in 0..2000 {
            field.advance_frame();
            p.position = Vec3::new(98.0, 0.0, 0.0);
            field.apply_boundary(&mut p, &bounds(), BoundaryPolicy::Freeze, 0.016);
            if p.frozen.is_some() {
                froze = true;
                break;
            }
        }
        assert!(froze, "freeze chance should fire within 2000 frames");
        assert_eq!(p.velocity, Vec3::ZERO);
        let saved = p.frozen.unwrap().saved_velocity;
        assert!(p.frozen.unwrap().remaining >= 2.0 && p.frozen.unwrap().remaining <= 5.0);

        // Tick past the frozen duration; velocity restores scaled down
        for _ in 0..400 {
            field.advance_frame();
            field.apply_boundary(&mut p, &bounds(), BoundaryPolicy::Freeze, 0.016);
            if p.frozen.is_none() {
                break;
            }
        }
        assert!(p.frozen.is_none(), "frozen state must expire");
        assert!((p.velocity.x - saved.x * 0.5).abs() < 1e-6);
        assert!(field
            .drain_effects()
            .iter()
            .any(|e| e.kind == EffectKind::Thaw));
    }

    #[test]
    fn orbit_applies_tangential_force_far_from_center() {
        let mut field = FlowField::new();
        let mut p = live_particle();
        let b = bounds();
        // Beyond 80% of the half-diagonal (~141), radially outward
        p.position = Vec3::new(120.0, 60.0, 0.0);
        p.velocity = Vec3::ZERO;
        field.apply_boundary(&mut p, &b, BoundaryPolicy::Orbit, 0.1);
        assert!(p.velocity.length() > 0.0, "orbit force applied");
        // Component toward center must be non-positive radial growth:
        // radial dot velocity should be negative (pulled inward)
        let radial = Vec3::new(120.0, 60.0, 0.0).normalized();
        assert!(p.velocity.dot(&radial) < 0.0, "weak centripetal attraction");

        // Inside the threshold nothing happens
        let mut q = live_particle();
        q.position = Vec3::new(10.0, 10.0, 0.0);
        q.velocity = Vec3::ZERO;
        field.apply_boundary(&mut q, &b, BoundaryPolicy::Orbit, 0.1);
        assert_eq!(q.velocity, Vec3::ZERO);
    }

    #[test]
    fn turbulent_jitters_near_boundary() {
        let mut field = FlowField::new();
        let mut p = live_particle();
        p.position = Vec3::new(95.0, 0.0, 0.0);
        p.velocity = Vec3::ZERO;
        let mut moved = false;
        for _ in 0..10 {
            field.advance_frame();
            field.apply_boundary(&mut p, &bounds(), BoundaryPolicy::Turbulent, 0.016);
            if p.velocity.length() > 0.0 {
                moved = true;
                break;
            }
        }
        assert!(moved, "jitter should perturb velocity in the margin band");
    }

    #[test]
    fn swirl_episode_is_time_bounded() {
        let mut field = FlowField::new();
        let mut p = live_particle();
        p.position = Vec3::new(0.0, 0.0, 0.0);
        p.swirl = Some(Swirl {
            direction: 1.0,
            strength: 10.0,
            remaining: 0.05,
        });
        field.apply_boundary(&mut p, &bounds(), BoundaryPolicy::Turbulent, 0.016);
        assert!(p.swirl.is_some());
        field.apply_boundary(&mut p, &bounds(), BoundaryPolicy::Turbulent, 0.016);
        field.apply_boundary(&mut p, &bounds(), BoundaryPolicy::Turbulent, 0.016);
        field.apply_boundary(&mut p, &bounds(), BoundaryPolicy::Turbulent, 0.016);
        assert!(p.swirl.is_none(), "swirl must end after its duration");
    }

    #[test]
    fn flow_steers_toward_pattern() {
        let mut field = FlowField::new();
        let lake = LakeId::from_raw(9);
        field
            .set_active_pattern(lake, FlowPatternKind::Spiral)
            .unwrap();
        let mut p = live_particle();
        p.position = Vec3::new(50.0, 0.0, 0.0);
        p.velocity = Vec3::ZERO;
        field.apply_flow(&mut p, lake, Vec3::ZERO, 0.0, 0.016, None);
        assert!(p.velocity.length() > 0.0);
        // Spiral at +x should push mostly in +y (counter-clockwise)
        assert!(p.velocity.y > 0.0);
    }

    #[test]
    fn frozen_particles_ignore_flow() {
        let mut field = FlowField::new();
        let lake = LakeId::from_raw(9);
        field
            .set_active_pattern(lake, FlowPatternKind::Chop)
            .unwrap();
        let mut p = live_particle();
        p.frozen = Some(Frozen {
            remaining: 1.0,
            saved_velocity: Vec3::ZERO,
        });
        p.velocity = Vec3::ZERO;
        field.apply_flow(&mut p, lake, Vec3::ZERO, 1.0, 0.016, None);
        assert_eq!(p.velocity, Vec3::ZERO);
    }
}
