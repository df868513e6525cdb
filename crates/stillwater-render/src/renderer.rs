//! Per-frame orchestration.
//!
//! Fixed stage order each frame: clock → performance sampling → governor
//! transition tick → apply quality settings → fluid step → particle system
//! updates → spatial/LOD culling → attribute packing → draw. A failing
//! stage is logged and skipped; nothing propagates out of `render_frame`,
//! so one bad frame can never stop the animation loop.

use crate::buffers::AttributeBuffers;
use std::collections::{HashMap, HashSet};
use stillwater_core::{LakeId, Result, Vec3};
use stillwater_quality::{FpsSampler, UpdatePhase};
use stillwater_runtime::{FrameClock, MapCamera, VizContext, VizEvent, WaterSystem};
use stillwater_sim::{
    DomainBounds, FluidGrid, LakeParticles, ParticleOptimizer, SpatialGrid,
};

/// Seconds between performance-adaptation samples
const ADAPT_INTERVAL: f32 = 3.0;
/// Half-extent of a lake's simulation domain, world units
const DOMAIN_HALF_EXTENT: f32 = 300.0;
/// Fluid grid resolution (cells per side, including the skirt)
const FLUID_CELLS: usize = 34;
/// Screen-space cell size for the culling grid, pixels
const GRID_CELL_SIZE: f32 = 100.0;

/// Where packed frames go. The GPU path wraps the sprite pipelines; tests
/// and headless runs use [`NullBackend`].
pub trait RenderBackend {
    fn draw(&mut self, buffers: &AttributeBuffers) -> Result<()>;
    fn name(&self) -> &str;
}

/// Backend that counts draws and otherwise discards everything
#[derive(Default)]
pub struct NullBackend {
    pub frames_drawn: usize,
    pub last_particle_count: usize,
}

impl RenderBackend for NullBackend {
    fn draw(&mut self, buffers: &AttributeBuffers) -> Result<()> {
        self.frames_drawn += 1;
        self.last_particle_count = buffers.len();
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

pub struct LakeRenderer<C: MapCamera, B: RenderBackend> {
    clock: FrameClock,
    fps: FpsSampler,
    camera: C,
    backend: B,
    systems: Vec<LakeParticles>,
    /// Auxiliary subsystems ticked after the lake systems, in
    /// registration order
    aux_systems: Vec<Box<dyn WaterSystem>>,
    fluids: HashMap<LakeId, FluidGrid>,
    grid: SpatialGrid,
    optimizer: ParticleOptimizer,
    buffers: AttributeBuffers,
    adapt_accumulator: f32,
    /// Host-reported heap usage fraction, fed to quality adaptation
    memory_fraction: f32,
    frame: u64,
}

impl<C: MapCamera, B: RenderBackend> LakeRenderer<C, B> {
    pub fn new(camera: C, backend: B, max_particles: usize, target_fps: f32) -> Self {
        Self {
            clock: FrameClock::new(),
            fps: FpsSampler::new(120),
            camera,
            backend,
            systems: Vec::new(),
            aux_systems: Vec::new(),
            fluids: HashMap::new(),
            grid: SpatialGrid::new(GRID_CELL_SIZE),
            optimizer: ParticleOptimizer::new(1000.0, target_fps),
            buffers: AttributeBuffers::new(max_particles),
            adapt_accumulator: 0.0,
            memory_fraction: 0.0,
            frame: 0,
        }
    }

    /// Report current heap usage as a fraction of the budget; sampled by
    /// the host on its own cadence
    pub fn set_memory_fraction(&mut self, fraction: f32) {
        self.memory_fraction = fraction.clamp(0.0, 1.0);
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn systems(&self) -> &[LakeParticles] {
        &self.systems
    }

    /// Register an auxiliary subsystem; initialization failure rejects it
    pub fn register_system(
        &mut self,
        ctx: &mut VizContext,
        mut system: Box<dyn WaterSystem>,
    ) -> Result<()> {
        system.initialize(ctx)?;
        println!("[render] registered system {}", system.name());
        self.aux_systems.push(system);
        Ok(())
    }

    /// Shut down auxiliary subsystems. Idempotent.
    pub fn shutdown(&mut self) {
        for system in &mut self.aux_systems {
            if let Err(err) = system.shutdown() {
                eprintln!("[render] {} shutdown failed: {err}", system.name());
            }
        }
        self.aux_systems.clear();
    }

    /// Activate a lake: select its flow pattern, request the camera move,
    /// and create its particle system (and fluid grid) on first activation.
    pub fn activate_lake(&mut self, ctx: &mut VizContext, lake: LakeId) -> Result<()> {
        ctx.activate_lake(lake)?;
        let site = ctx.registry.require(lake)?;
        let center = Vec3::new(site.longitude as f32, site.latitude as f32, 0.0);
        let config = site.type_config();

        for event in ctx.events.drain() {
            if let VizEvent::CameraFlyTo { pose, duration } = event {
                self.camera.fly_to(pose, duration);
            } else {
                ctx.events.push(event);
            }
        }

        if let Some(existing) = self.systems.iter_mut().find(|s| s.lake() == lake) {
            existing.set_active(true);
            return Ok(());
        }
        let bounds = DomainBounds::centered(center, DOMAIN_HALF_EXTENT, DOMAIN_HALF_EXTENT);
        self.systems
            .push(LakeParticles::new(lake, center, config, bounds));
        self.fluids.entry(lake).or_insert_with(|| {
            FluidGrid::new(
                FLUID_CELLS,
                1.0 / 60.0,
                0.0001,
                0.0001,
                (bounds.min_x, bounds.min_y),
                (bounds.width(), bounds.height()),
            )
        });
        Ok(())
    }

    /// Return a lake's particles to the pool and drop its fluid grid
    pub fn deactivate_lake(&mut self, ctx: &mut VizContext, lake: LakeId) {
        if let Some(system) = self.systems.iter_mut().find(|s| s.lake() == lake) {
            system.dispose(&mut ctx.pool);
        }
        self.systems.retain(|s| s.lake() != lake);
        self.fluids.remove(&lake);
    }

    /// External force/ripple at a screen point (user interaction);
    /// unprojected through the camera into world space. Screen points
    /// with no world position are dropped.
    pub fn apply_ripple_at_screen(
        &mut self,
        lake: LakeId,
        screen_x: f32,
        screen_y: f32,
        strength: f32,
        radius: f32,
    ) {
        if let Some(world) = self.camera.unproject([screen_x, screen_y]) {
            self.apply_ripple(lake, world.x, world.y, strength, radius);
        }
    }

    /// World-space ripple, for callers that already hold a world point
    pub fn apply_ripple(&mut self, lake: LakeId, x: f32, y: f32, strength: f32, radius: f32) {
        if let Some(system) = self.systems.iter_mut().find(|s| s.lake() == lake) {
            system.apply_force(x, y, strength, radius, self.fluids.get_mut(&lake));
        }
    }

    /// Run one frame. Never fails; failing stages are contained and logged.
    pub fn render_frame(&mut self, ctx: &mut VizContext) {
        self.clock.tick();
        let dt = self.clock.delta_f32();
        self.frame = self.frame.wrapping_add(1);
        self.fps.record_frame(dt);

        self.sample_performance(ctx, dt);
        self.apply_quality(ctx);
        self.step_simulation(ctx, dt);
        self.cull_and_pack(ctx);

        if let Err(err) = self.backend.draw(&self.buffers) {
            eprintln!("[render] {} backend draw failed: {err}", self.backend.name());
        }
        self.update_metrics(ctx);
    }

    /// Multi-second cadence adaptation: feed the sampled FPS to the
    /// governor's tier stepping and the optimizer's distance hysteresis.
    fn sample_performance(&mut self, ctx: &mut VizContext, dt: f32) {
        self.adapt_accumulator += dt;
        if self.adapt_accumulator < ADAPT_INTERVAL {
            return;
        }
        self.adapt_accumulator = 0.0;
        if let Some(fps) = self.fps.fps() {
            ctx.governor.sample_performance(fps, self.memory_fraction);
            self.optimizer.adapt_to_performance(fps);
        }
    }

    /// Governor transition tick runs before anything reads settings
    fn apply_quality(&mut self, ctx: &mut VizContext) {
        ctx.governor.tick();
        for update in ctx.governor.drain_updates() {
            let settings = update.settings;
            self.buffers.set_draw_limit(settings.max_particles as usize);
            self.optimizer
                .set_distance_factor(settings.render_distance_factor);
            let fluid_quality = settings.physics_iterations as f32 / 4.0;
            for fluid in self.fluids.values_mut() {
                fluid.set_quality(fluid_quality);
            }
            for system in &mut self.systems {
                let scaled =
                    (system.config().particle_count as f32 * settings.particle_multiplier) as usize;
                system.set_particle_limit(scaled.min(settings.max_particles as usize));
            }
            ctx.events.push(VizEvent::QualityChanged {
                tier: update.tier,
                complete: update.phase == UpdatePhase::Complete,
            });
        }
    }

    fn step_simulation(&mut self, ctx: &mut VizContext, dt: f32) {
        ctx.flow.advance_frame();
        for fluid in self.fluids.values_mut() {
            fluid.step_throttled(dt);
        }
        for system in &mut self.systems {
            let fluid = self.fluids.get(&system.lake());
            system.update(dt, &mut ctx.flow, fluid, &mut ctx.pool);
        }
        for effect in ctx.flow.drain_effects() {
            ctx.events.push(VizEvent::Effect(effect));
        }
        for system in &mut self.aux_systems {
            // A failing subsystem is contained; the frame goes on
            if let Err(err) = system.update(ctx, dt) {
                eprintln!("[render] system {} failed: {err}", system.name());
            }
        }
    }

    /// Distance LOD, screen-space grid culling, then attribute packing
    fn cull_and_pack(&mut self, ctx: &mut VizContext) {
        let camera_pos = self.camera.pose().center;
        for system in &mut self.systems {
            self.optimizer
                .optimize_system(system.particles_mut(), camera_pos, self.frame);
        }

        self.grid.clear();
        for system in &mut self.systems {
            for particle in system.particles_mut() {
                particle.screen = None;
                if !particle.visible {
                    continue;
                }
                if let Some(screen) = self.camera.project(particle.position) {
                    particle.screen = Some(screen);
                    self.grid.insert(particle.id, screen[0], screen[1]);
                }
            }
        }
        self.grid.update_visible_cells(&self.camera.viewport());
        let on_screen: HashSet<u32> = self.grid.query().into_iter().collect();

        self.buffers.clear();
        'pack: for system in &self.systems {
            for particle in system.particles() {
                if !particle.visible || !on_screen.contains(&particle.id) {
                    continue;
                }
                if !self.buffers.push(particle) {
                    break 'pack;
                }
            }
        }
        ctx.metrics.culled_count = self.grid.culled_count() + self.optimizer.stats().culled;
        ctx.metrics.visible_count = self.buffers.len();
    }

    fn update_metrics(&mut self, ctx: &mut VizContext) {
        ctx.metrics.fps = self.fps.fps().unwrap_or(0.0);
        ctx.metrics.particle_count = self.systems.iter().map(LakeParticles::len).sum();
        ctx.metrics.pool_reuse_ratio = ctx.pool.reuse_ratio();
        ctx.metrics.tier = ctx.governor.current();
    }
}
