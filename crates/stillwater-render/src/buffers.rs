//! Reusable flat attribute buffers handed to the rendering backend.
//!
//! Four parallel arrays per frame: position (3 floats/particle), color
//! (3 floats, normalized), size (1 float), opacity (1 float). The vectors
//! are cleared and refilled every frame, never reallocated in steady state;
//! they are exclusively the renderer's during the draw step.

use stillwater_sim::Particle;

pub struct AttributeBuffers {
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    opacities: Vec<f32>,
    /// Hard cap on packed particles (quality tier's max)
    draw_limit: usize,
}

impl AttributeBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity * 3),
            colors: Vec::with_capacity(capacity * 3),
            sizes: Vec::with_capacity(capacity),
            opacities: Vec::with_capacity(capacity),
            draw_limit: capacity,
        }
    }

    pub fn set_draw_limit(&mut self, limit: usize) {
        self.draw_limit = limit;
    }

    pub fn draw_limit(&self) -> usize {
        self.draw_limit
    }

    /// Empty the buffers for a new frame, keeping their allocations
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.sizes.clear();
        self.opacities.clear();
    }

    /// Append one particle's display attributes. Returns false (and packs
    /// nothing) once the draw limit is reached.
    pub fn push(&mut self, particle: &Particle) -> bool {
        if self.len() >= self.draw_limit {
            return false;
        }
        let p = particle.position;
        self.positions.extend_from_slice(&[p.x, p.y, p.z]);
        let c = particle.color;
        self.colors.extend_from_slice(&[c.r, c.g, c.b]);
        self.sizes.push(particle.display_size);
        self.opacities.push(particle.display_opacity);
        true
    }

    /// Packed particle count this frame
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillwater_core::Vec3;
    use stillwater_lakes::{LakeCategory, LakeTypeConfig};
    use stillwater_sim::SimRng;

    fn particle(id: u32) -> Particle {
        let mut rng = SimRng::new(id);
        let mut p = Particle::dormant(id);
        p.init(
            &mut rng,
            Vec3::ZERO,
            10.0,
            &LakeTypeConfig::for_category(LakeCategory::Freshwater),
        );
        p
    }

    #[test]
    fn arrays_stay_parallel() {
        let mut buffers = AttributeBuffers::new(16);
        for i in 0..5 {
            assert!(buffers.push(&particle(i)));
        }
        assert_eq!(buffers.len(), 5);
        assert_eq!(buffers.positions().len(), 15);
        assert_eq!(buffers.colors().len(), 15);
        assert_eq!(buffers.sizes().len(), 5);
        assert_eq!(buffers.opacities().len(), 5);
    }

    #[test]
    fn draw_limit_caps_packing() {
        let mut buffers = AttributeBuffers::new(3);
        for i in 0..10 {
            buffers.push(&particle(i));
        }
        assert_eq!(buffers.len(), 3);
        assert!(!buffers.push(&particle(99)));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buffers = AttributeBuffers::new(8);
        for i in 0..8 {
            buffers.push(&particle(i));
        }
        let cap = buffers.positions.capacity();
        buffers.clear();
        assert!(buffers.is_empty());
        assert_eq!(buffers.positions.capacity(), cap, "no reallocation on clear");
    }

    #[test]
    fn display_fields_are_packed_not_authoritative() {
        let mut buffers = AttributeBuffers::new(4);
        let mut p = particle(1);
        p.set_lod(0.5);
        buffers.push(&p);
        assert!((buffers.sizes()[0] - p.size * 0.5).abs() < 1e-6);
    }
}
