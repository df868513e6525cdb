//! Per-lake particle system: owns the live particle collection and drives
//! the integrate → expire → trim → replenish cycle each frame.

use crate::flow::{DomainBounds, FlowField};
use crate::fluid::FluidGrid;
use crate::particle::Particle;
use crate::pool::ParticlePool;
use crate::rng::SimRng;
use stillwater_core::{LakeId, Vec3};
use stillwater_lakes::LakeTypeConfig;

/// Spawn throttle: at most this many replenished per tick
const MAX_REPLENISH_PER_TICK: usize = 10;

pub struct LakeParticles {
    lake: LakeId,
    center: Vec3,
    config: LakeTypeConfig,
    bounds: DomainBounds,
    particles: Vec<Particle>,
    particle_limit: usize,
    spawn_radius: f32,
    active: bool,
    /// Seconds since creation, fed to time-varying flow patterns
    elapsed: f32,
    rng: SimRng,
}

impl LakeParticles {
    pub fn new(lake: LakeId, center: Vec3, config: LakeTypeConfig, bounds: DomainBounds) -> Self {
        let spawn_radius = bounds.width().min(bounds.height()) * 0.4;
        let particle_limit = config.particle_count;
        Self {
            lake,
            center,
            config,
            bounds,
            particles: Vec::with_capacity(particle_limit),
            particle_limit,
            spawn_radius,
            active: true,
            elapsed: 0.0,
            rng: SimRng::new(lake.raw() as u32 ^ 0xA511_CE5D),
        }
    }

    pub fn lake(&self) -> LakeId {
        self.lake
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn config(&self) -> &LakeTypeConfig {
        &self.config
    }

    pub fn bounds(&self) -> &DomainBounds {
        &self.bounds
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particle_limit(&self) -> usize {
        self.particle_limit
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Lower (or raise) the live-count target. Overflow is trimmed on the
    /// next update, shortfall refills at the throttled rate.
    pub fn set_particle_limit(&mut self, limit: usize) {
        self.particle_limit = limit;
    }

    /// One simulation tick for this lake.
    ///
    /// Order: flow steering, integration, boundary policy, then expired
    /// particles go back to the pool, overflow is trimmed, and shortfall is
    /// replenished up to the per-tick throttle.
    pub fn update(
        &mut self,
        dt: f32,
        flow: &mut FlowField,
        fluid: Option<&FluidGrid>,
        pool: &mut ParticlePool,
    ) {
        if !self.active {
            return;
        }
        self.elapsed += dt.max(0.0);

        let mut i = 0;
        while i < self.particles.len() {
            let particle = &mut self.particles[i];
            flow.apply_flow(particle, self.lake, self.center, self.elapsed, dt, fluid);
            let live = particle.update(dt);
            if live {
                flow.apply_boundary(particle, &self.bounds, self.config.boundary, dt);
                i += 1;
            } else {
                let expired = self.particles.swap_remove(i);
                pool.release(expired);
            }
        }

        while self.particles.len() > self.particle_limit {
            if let Some(extra) = self.particles.pop() {
                pool.release(extra);
            }
        }

        let shortfall = self.particle_limit.saturating_sub(self.particles.len());
        for _ in 0..shortfall.min(MAX_REPLENISH_PER_TICK) {
            let particle = pool.acquire(&mut self.rng, self.center, self.spawn_radius, &self.config);
            self.particles.push(particle);
        }
    }

    /// Radial velocity impulse around a world point (interaction ripple).
    /// When a fluid grid is attached the impulse goes through it instead,
    /// so the solver and the particles stay consistent.
    pub fn apply_force(
        &mut self,
        x: f32,
        y: f32,
        strength: f32,
        radius: f32,
        fluid: Option<&mut FluidGrid>,
    ) {
        if let Some(grid) = fluid {
            grid.add_ripple(x, y, strength, (radius / 10.0).ceil().max(1.0) as i32);
            return;
        }
        let radius_sq = radius * radius;
        for particle in &mut self.particles {
            let dx = particle.position.x - x;
            let dy = particle.position.y - y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq > radius_sq || dist_sq < 1e-6 {
                continue;
            }
            let dist = dist_sq.sqrt();
            let falloff = 1.0 - dist / radius;
            particle.velocity.x += dx / dist * strength * falloff;
            particle.velocity.y += dy / dist * strength * falloff;
        }
    }

    /// Return every owned particle to the pool and deactivate
    pub fn dispose(&mut self, pool: &mut ParticlePool) {
        for particle in self.particles.drain(..) {
            pool.release(particle);
        }
        self.active = false;
    }
}
