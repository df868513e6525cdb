//! Grid-based incompressible fluid solver (stable-fluids scheme)
//!
//! Square N×N grid with a one-cell boundary skirt. Velocity and a passive
//! density field evolve by diffuse → project → advect → project each step.
//! Particles sample the grid for high-fidelity flow; the solver degrades
//! gracefully under the quality knob by cutting iterations and frame rate.

/// Boundary mode for [`set_bnd`]: which component mirrors at walls
#[derive(Clone, Copy, PartialEq, Eq)]
enum Bound {
    /// Plain copy (density, pressure, divergence)
    Scalar,
    /// Horizontal velocity: negate at left/right walls
    VelX,
    /// Vertical velocity: negate at top/bottom walls
    VelY,
}

/// Closed-box fluid grid covering one lake's domain.
pub struct FluidGrid {
    /// Cells per side, including the boundary skirt
    n: usize,
    dt: f32,
    diffusion: f32,
    viscosity: f32,
    vx: Vec<f32>,
    vy: Vec<f32>,
    vx0: Vec<f32>,
    vy0: Vec<f32>,
    density: Vec<f32>,
    density0: Vec<f32>,
    /// World-space extent mapped onto the grid
    world_min: (f32, f32),
    world_size: (f32, f32),
    /// Quality knob in [0.2, 1.0]: scales solver iterations and step rate
    quality: f32,
    /// Accumulates wall time for the throttled stepper
    step_accumulator: f32,
}

const BASE_ITERATIONS: usize = 4;
/// Throttled step interval when quality drops below 0.5 (~30 Hz)
const THROTTLE_INTERVAL: f32 = 1.0 / 30.0;

impl FluidGrid {
    pub fn new(
        n: usize,
        dt: f32,
        diffusion: f32,
        viscosity: f32,
        world_min: (f32, f32),
        world_size: (f32, f32),
    ) -> Self {
        let n = n.max(3);
        let cells = n * n;
        Self {
            n,
            dt,
            diffusion,
            viscosity,
            vx: vec![0.0; cells],
            vy: vec![0.0; cells],
            vx0: vec![0.0; cells],
            vy0: vec![0.0; cells],
            density: vec![0.0; cells],
            density0: vec![0.0; cells],
            world_min,
            world_size,
            quality: 1.0,
            step_accumulator: 0.0,
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Flattened index, clamped so out-of-range coordinates read the skirt
    fn idx(&self, x: usize, y: usize) -> usize {
        let x = x.min(self.n - 1);
        let y = y.min(self.n - 1);
        x + y * self.n
    }

    /// Set the simulation-quality factor, clamped to [0.2, 1.0]
    pub fn set_quality(&mut self, quality: f32) {
        self.quality = quality.clamp(0.2, 1.0);
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    fn iterations(&self) -> usize {
        ((BASE_ITERATIONS as f32 * self.quality).round() as usize).max(1)
    }

    /// World coordinates → fractional grid coordinates over the interior
    fn world_to_grid(&self, wx: f32, wy: f32) -> (f32, f32) {
        let interior = (self.n - 2) as f32;
        let gx = (wx - self.world_min.0) / self.world_size.0 * interior + 1.0;
        let gy = (wy - self.world_min.1) / self.world_size.1 * interior + 1.0;
        (gx, gy)
    }

    /// Interior cells within `radius_cells` of a world point, with their
    /// falloff weight and cell offset from the impulse center
    fn impulse_cells(&self, wx: f32, wy: f32, radius_cells: i32) -> Vec<(usize, f32, f32, f32)> {
        let (gx, gy) = self.world_to_grid(wx, wy);
        let cx = gx as i32;
        let cy = gy as i32;
        let mut cells = Vec::new();
        for dy in -radius_cells..=radius_cells {
            for dx in -radius_cells..=radius_cells {
                let x = cx + dx;
                let y = cy + dy;
                if x < 1 || y < 1 || x >= (self.n as i32 - 1) || y >= (self.n as i32 - 1) {
                    continue;
                }
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                if dist > radius_cells as f32 {
                    continue;
                }
                let falloff = 1.0 - dist / (radius_cells as f32 + 1.0);
                cells.push((self.idx(x as usize, y as usize), falloff, dx as f32, dy as f32));
            }
        }
        cells
    }

    /// Inject a directional velocity impulse `(vx, vy)` (grid cells/s, plus
    /// a puff of density) with radial falloff around a world-space point.
    /// Used for drag-style currents.
    pub fn add_velocity(&mut self, wx: f32, wy: f32, vx: f32, vy: f32, radius_cells: i32) {
        let magnitude = (vx * vx + vy * vy).sqrt();
        for (i, falloff, _, _) in self.impulse_cells(wx, wy, radius_cells) {
            self.vx[i] += vx * falloff;
            self.vy[i] += vy * falloff;
            self.density[i] += magnitude * falloff * 0.5;
        }
    }

    /// Inject an outward radial impulse around a world-space point. Used
    /// for interaction ripples.
    pub fn add_ripple(&mut self, wx: f32, wy: f32, strength: f32, radius_cells: i32) {
        for (i, falloff, dx, dy) in self.impulse_cells(wx, wy, radius_cells) {
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > 1e-3 {
                self.vx[i] += dx / dist * strength * falloff;
                self.vy[i] += dy / dist * strength * falloff;
            }
            self.density[i] += strength * falloff * 0.5;
        }
    }

    /// Bilinearly sample velocity at a world position, in world units/s
    pub fn sample_velocity(&self, wx: f32, wy: f32) -> (f32, f32) {
        let (gx, gy) = self.world_to_grid(wx, wy);
        let gx = gx.clamp(1.0, (self.n - 2) as f32);
        let gy = gy.clamp(1.0, (self.n - 2) as f32);
        let x0 = gx.floor() as usize;
        let y0 = gy.floor() as usize;
        let x1 = (x0 + 1).min(self.n - 2);
        let y1 = (y0 + 1).min(self.n - 2);
        let sx = gx - x0 as f32;
        let sy = gy - y0 as f32;

        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        let sample = |field: &[f32]| {
            let top = lerp(field[self.idx(x0, y0)], field[self.idx(x1, y0)], sx);
            let bottom = lerp(field[self.idx(x0, y1)], field[self.idx(x1, y1)], sx);
            lerp(top, bottom, sy)
        };
        // Cell velocities are in grid cells/s; scale back to world units
        let cell_w = self.world_size.0 / (self.n - 2) as f32;
        let cell_h = self.world_size.1 / (self.n - 2) as f32;
        (sample(&self.vx) * cell_w, sample(&self.vy) * cell_h)
    }

    pub fn density_at(&self, x: usize, y: usize) -> f32 {
        self.density[self.idx(x, y)]
    }

    /// One full solver step: velocity diffuse + project, advect + project,
    /// then the passive density field.
    pub fn step(&mut self) {
        let n = self.n;
        let iters = self.iterations();
        let dt = self.dt;

        std::mem::swap(&mut self.vx, &mut self.vx0);
        std::mem::swap(&mut self.vy, &mut self.vy0);
        diffuse(Bound::VelX, &mut self.vx, &self.vx0, self.viscosity, dt, n, iters);
        diffuse(Bound::VelY, &mut self.vy, &self.vy0, self.viscosity, dt, n, iters);
        project(&mut self.vx, &mut self.vy, &mut self.vx0, &mut self.vy0, n, iters);

        std::mem::swap(&mut self.vx, &mut self.vx0);
        std::mem::swap(&mut self.vy, &mut self.vy0);
        advect(Bound::VelX, &mut self.vx, &self.vx0, &self.vx0, &self.vy0, dt, n);
        advect(Bound::VelY, &mut self.vy, &self.vy0, &self.vx0, &self.vy0, dt, n);
        project(&mut self.vx, &mut self.vy, &mut self.vx0, &mut self.vy0, n, iters);

        std::mem::swap(&mut self.density, &mut self.density0);
        diffuse(
            Bound::Scalar,
            &mut self.density,
            &self.density0,
            self.diffusion,
            dt,
            n,
            iters,
        );
        std::mem::swap(&mut self.density, &mut self.density0);
        advect(
            Bound::Scalar,
            &mut self.density,
            &self.density0,
            &self.vx,
            &self.vy,
            dt,
            n,
        );
    }

    /// Step, but at a reduced rate when quality is below 0.5.
    /// Returns true if a solver step actually ran.
    pub fn step_throttled(&mut self, frame_dt: f32) -> bool {
        if self.quality >= 0.5 {
            self.step();
            return true;
        }
        self.step_accumulator += frame_dt.max(0.0);
        if self.step_accumulator >= THROTTLE_INTERVAL {
            self.step_accumulator -= THROTTLE_INTERVAL;
            self.step();
            return true;
        }
        false
    }

    /// Total absolute divergence over interior cells (diagnostic)
    pub fn total_divergence(&self) -> f32 {
        let n = self.n;
        let mut total = 0.0;
        for y in 1..n - 1 {
            for x in 1..n - 1 {
                let div = (self.vx[self.idx(x + 1, y)] - self.vx[self.idx(x - 1, y)]
                    + self.vy[self.idx(x, y + 1)]
                    - self.vy[self.idx(x, y - 1)])
                    * 0.5;
                total += div.abs();
            }
        }
        total
    }
}

fn idx(n: usize, x: usize, y: usize) -> usize {
    x.min(n - 1) + y.min(n - 1) * n
}

/// Enforce closed-box walls: velocity components mirror with negation at
/// their wall, scalars copy, corners average their two neighbors.
fn set_bnd(bound: Bound, field: &mut [f32], n: usize) {
    for i in 1..n - 1 {
        field[idx(n, i, 0)] = if bound == Bound::VelY {
            -field[idx(n, i, 1)]
        } else {
            field[idx(n, i, 1)]
        };
        field[idx(n, i, n - 1)] = if bound == Bound::VelY {
            -field[idx(n, i, n - 2)]
        } else {
            field[idx(n, i, n - 2)]
        };
        field[idx(n, 0, i)] = if bound == Bound::VelX {
            -field[idx(n, 1, i)]
        } else {
            field[idx(n, 1, i)]
        };
        field[idx(n, n - 1, i)] = if bound == Bound::VelX {
            -field[idx(n, n - 2, i)]
        } else {
            field[idx(n, n - 2, i)]
        };
    }
    field[idx(n, 0, 0)] = 0.5 * (field[idx(n, 1, 0)] + field[idx(n, 0, 1)]);
    field[idx(n, 0, n - 1)] = 0.5 * (field[idx(n, 1, n - 1)] + field[idx(n, 0, n - 2)]);
    field[idx(n, n - 1, 0)] = 0.5 * (field[idx(n, n - 2, 0)] + field[idx(n, n - 1, 1)]);
    field[idx(n, n - 1, n - 1)] =
        0.5 * (field[idx(n, n - 2, n - 1)] + field[idx(n, n - 1, n - 2)]);
}

/// Gauss-Seidel relaxation for the implicit diffusion / pressure systems
fn lin_solve(bound: Bound, field: &mut [f32], prev: &[f32], a: f32, c: f32, n: usize, iters: usize) {
    let c_recip = 1.0 / c;
    for _ in 0..iters {
        for y in 1..n - 1 {
            for x in 1..n - 1 {
                field[idx(n, x, y)] = (prev[idx(n, x, y)]
                    + a * (field[idx(n, x + 1, y)]
                        + field[idx(n, x - 1, y)]
                        + field[idx(n, x, y + 1)]
                        + field[idx(n, x, y - 1)]))
                    * c_recip;
            }
        }
        set_bnd(bound, field, n);
    }
}

fn diffuse(bound: Bound, field: &mut [f32], prev: &[f32], rate: f32, dt: f32, n: usize, iters: usize) {
    let a = dt * rate * ((n - 2) * (n - 2)) as f32;
    lin_solve(bound, field, prev, a, 1.0 + 4.0 * a, n, iters);
}

/// Remove the divergent component of the velocity field: compute
/// divergence, solve the pressure Poisson system, subtract its gradient.
fn project(vx: &mut [f32], vy: &mut [f32], p: &mut [f32], div: &mut [f32], n: usize, iters: usize) {
    let h = 1.0 / (n - 2) as f32;
    for y in 1..n - 1 {
        for x in 1..n - 1 {
            div[idx(n, x, y)] = -0.5
                * h
                * (vx[idx(n, x + 1, y)] - vx[idx(n, x - 1, y)] + vy[idx(n, x, y + 1)]
                    - vy[idx(n, x, y - 1)]);
            p[idx(n, x, y)] = 0.0;
        }
    }
    set_bnd(Bound::Scalar, div, n);
    set_bnd(Bound::Scalar, p, n);
    lin_solve(Bound::Scalar, p, div, 1.0, 4.0, n, iters);

    for y in 1..n - 1 {
        for x in 1..n - 1 {
            vx[idx(n, x, y)] -= 0.5 * (p[idx(n, x + 1, y)] - p[idx(n, x - 1, y)]) / h;
            vy[idx(n, x, y)] -= 0.5 * (p[idx(n, x, y + 1)] - p[idx(n, x, y - 1)]) / h;
        }
    }
    set_bnd(Bound::VelX, vx, n);
    set_bnd(Bound::VelY, vy, n);
}

/// Semi-Lagrangian advection: trace each cell backward along the velocity
/// field and bilinearly interpolate the source value.
fn advect(bound: Bound, field: &mut [f32], prev: &[f32], vx: &[f32], vy: &[f32], dt: f32, n: usize) {
    let dt0 = dt * (n - 2) as f32;
    for y in 1..n - 1 {
        for x in 1..n - 1 {
            let mut src_x = x as f32 - dt0 * vx[idx(n, x, y)];
            let mut src_y = y as f32 - dt0 * vy[idx(n, x, y)];
            src_x = src_x.clamp(0.5, (n - 2) as f32 + 0.5);
            src_y = src_y.clamp(0.5, (n - 2) as f32 + 0.5);

            let x0 = src_x.floor() as usize;
            let y0 = src_y.floor() as usize;
            let x1 = x0 + 1;
            let y1 = y0 + 1;
            let sx = src_x - x0 as f32;
            let sy = src_y - y0 as f32;

            field[idx(n, x, y)] = (1.0 - sy)
                * ((1.0 - sx) * prev[idx(n, x0, y0)] + sx * prev[idx(n, x1, y0)])
                + sy * ((1.0 - sx) * prev[idx(n, x0, y1)] + sx * prev[idx(n, x1, y1)]);
        }
    }
    set_bnd(bound, field, n);
}
