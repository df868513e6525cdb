//! Free-list particle pool bounding allocation under sustained churn

use crate::particle::Particle;
use crate::rng::SimRng;
use stillwater_core::Vec3;
use stillwater_lakes::LakeTypeConfig;

/// Capacity-bounded reuse pool.
///
/// `acquire` moves a particle out to the caller (systems own their particles
/// by value, so a double-acquire cannot be expressed), `release` moves it
/// back. Neither operation can fail: an empty free list degrades to a fresh
/// allocation, a full one to dropping the released particle.
pub struct ParticlePool {
    free: Vec<Particle>,
    max_size: usize,
    active: usize,
    total_created: u64,
    total_reused: u64,
    next_id: u32,
}

impl ParticlePool {
    pub fn new(max_size: usize) -> Self {
        Self {
            free: Vec::with_capacity(max_size.min(4096)),
            max_size,
            active: 0,
            total_created: 0,
            total_reused: 0,
            next_id: 1,
        }
    }

    /// Pop from the free list (or construct), then fully initialize.
    pub fn acquire(
        &mut self,
        rng: &mut SimRng,
        center: Vec3,
        spawn_radius: f32,
        config: &LakeTypeConfig,
    ) -> Particle {
        let mut particle = match self.free.pop() {
            Some(p) => {
                self.total_reused += 1;
                p
            }
            None => {
                self.total_created += 1;
                let id = self.next_id;
                self.next_id = self.next_id.wrapping_add(1).max(1);
                Particle::dormant(id)
            }
        };
        particle.init(rng, center, spawn_radius, config);
        self.active += 1;
        particle
    }

    /// Reset and return a particle. Dropped silently if the pool is full.
    pub fn release(&mut self, mut particle: Particle) {
        particle.reset();
        self.active = self.active.saturating_sub(1);
        if self.free.len() < self.max_size {
            self.free.push(particle);
        }
        // else: dropped — capacity bound under sustained churn
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn total_created(&self) -> u64 {
        self.total_created
    }

    pub fn total_reused(&self) -> u64 {
        self.total_reused
    }

    /// Share of acquisitions served from the free list
    pub fn reuse_ratio(&self) -> f32 {
        let total = self.total_created + self.total_reused;
        if total == 0 {
            0.0
        } else {
            self.total_reused as f32 / total as f32
        }
    }
}
