//! Screen-space spatial partitioning for frustum culling
//!
//! Particles are bucketed into fixed-size screen cells each frame; only
//! cells intersecting the viewport are walked when building the visible
//! set. Cells partition the plane: every inserted particle is in exactly
//! one cell, so visible + culled always equals inserted.

use std::collections::{HashMap, HashSet};

/// Viewport rectangle in screen pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenBounds {
    pub width: f32,
    pub height: f32,
}

impl ScreenBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<u32>>,
    visible_cells: HashSet<(i32, i32)>,
    inserted: usize,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1.0),
            cells: HashMap::new(),
            visible_cells: HashSet::new(),
            inserted: 0,
        }
    }

    /// Cell coordinate by floor division. A particle exactly on a cell
    /// boundary lands in the higher-indexed cell (floor of the ratio).
    fn cell_for(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// Drop all buckets; call at the start of every frame
    pub fn clear(&mut self) {
        // Keep allocated buckets around, just empty them
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        self.inserted = 0;
    }

    pub fn insert(&mut self, id: u32, screen_x: f32, screen_y: f32) {
        let key = self.cell_for(screen_x, screen_y);
        self.cells.entry(key).or_default().push(id);
        self.inserted += 1;
    }

    /// Recompute which cells intersect the viewport: per axis, exactly the
    /// cell range `[floor(min/size), ceil(max/size))`. The viewport origin
    /// is the screen origin.
    pub fn update_visible_cells(&mut self, bounds: &ScreenBounds) {
        self.visible_cells.clear();
        let (min_cx, min_cy) = self.cell_for(0.0, 0.0);
        let max_cx = (bounds.width / self.cell_size).ceil() as i32;
        let max_cy = (bounds.height / self.cell_size).ceil() as i32;
        for cy in min_cy..max_cy {
            for cx in min_cx..max_cx {
                self.visible_cells.insert((cx, cy));
            }
        }
    }

    /// Ids of all particles in viewport-overlapping cells
    pub fn query(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.inserted);
        for key in &self.visible_cells {
            if let Some(bucket) = self.cells.get(key) {
                out.extend_from_slice(bucket);
            }
        }
        out
    }

    /// Recompute the visible set for the viewport, then query it
    pub fn query_viewport(&mut self, bounds: &ScreenBounds) -> Vec<u32> {
        self.update_visible_cells(bounds);
        self.query()
    }

    pub fn inserted_count(&self) -> usize {
        self.inserted
    }

    /// Inserted particles not in any visible cell
    pub fn culled_count(&self) -> usize {
        self.inserted - self.query_count()
    }

    fn query_count(&self) -> usize {
        self.visible_cells
            .iter()
            .filter_map(|key| self.cells.get(key))
            .map(Vec::len)
            .sum()
    }
}
