//! Shared visualization context.
//!
//! One explicit struct constructed at startup and passed by reference to
//! every subsystem, instead of ambient global state. Construction is two
//! phase: `new` allocates everything with defaults, then callers wire lake
//! data and quality with `load_lakes` / `set_governor` before the first
//! frame.

use crate::camera::CameraPose;
use crate::events::{EventBus, VizEvent};
use crate::metrics::Metrics;
use stillwater_core::{LakeId, Result, Vec3};
use stillwater_lakes::LakeRegistry;
use stillwater_quality::{QualityGovernor, QualityTier};
use stillwater_sim::{FlowField, ParticlePool};

pub struct VizContext {
    pub registry: LakeRegistry,
    pub pool: ParticlePool,
    pub flow: FlowField,
    pub governor: QualityGovernor,
    pub events: EventBus,
    pub metrics: Metrics,
    active_lake: Option<LakeId>,
}

impl VizContext {
    /// Phase one: allocate with defaults and an empty lake registry
    pub fn new(pool_capacity: usize, initial_tier: QualityTier, target_fps: f32) -> Self {
        Self {
            registry: LakeRegistry::default(),
            pool: ParticlePool::new(pool_capacity),
            flow: FlowField::new(),
            governor: QualityGovernor::new(initial_tier, target_fps),
            events: EventBus::new(),
            metrics: Metrics::default(),
            active_lake: None,
        }
    }

    /// Phase two: install lake configuration
    pub fn load_lakes(&mut self, registry: LakeRegistry) {
        self.registry = registry;
    }

    pub fn set_governor(&mut self, governor: QualityGovernor) {
        self.governor = governor;
    }

    pub fn active_lake(&self) -> Option<LakeId> {
        self.active_lake
    }

    /// Switch the active lake: selects its flow pattern and broadcasts the
    /// activation plus a fly-to request toward its geographic center.
    pub fn activate_lake(&mut self, lake: LakeId) -> Result<()> {
        let site = self.registry.require(lake)?;
        let config = site.type_config();
        let pose = CameraPose {
            center: Vec3::new(site.longitude as f32, site.latitude as f32, 0.0),
            zoom: site.zoom as f32,
            bearing: site.bearing as f32,
            pitch: site.pitch as f32,
        };
        let duration = site.transition_duration;

        self.flow.set_active_pattern(lake, config.flow_pattern)?;
        self.active_lake = Some(lake);
        println!("[context] activated lake {lake}");
        self.events.push(VizEvent::LakeActivated(lake));
        self.events.push(VizEvent::CameraFlyTo { pose, duration });
        Ok(())
    }
}
