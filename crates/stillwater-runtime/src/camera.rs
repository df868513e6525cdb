//! The map/camera boundary.
//!
//! The core never drives the camera directly; it consumes a projection
//! and viewport, and may request a fire-and-forget fly-to on lake switch.

use stillwater_core::Vec3;
use stillwater_sim::ScreenBounds;

/// Camera state as exposed by the map provider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Geographic center (x = longitude, y = latitude)
    pub center: Vec3,
    pub zoom: f32,
    pub bearing: f32,
    pub pitch: f32,
}

impl CameraPose {
    pub fn looking_at(center: Vec3, zoom: f32) -> Self {
        Self {
            center,
            zoom,
            bearing: 0.0,
            pitch: 0.0,
        }
    }
}

/// What the simulation needs from a map provider.
///
/// `project` may fail for positions behind the camera or outside the
/// projectable range; callers treat `None` as "no screen presence".
pub trait MapCamera {
    fn project(&self, world: Vec3) -> Option<[f32; 2]>;
    /// Inverse of [`project`] at ground level; `None` when the screen
    /// point has no world position (horizon, off-globe)
    fn unproject(&self, screen: [f32; 2]) -> Option<Vec3>;
    fn viewport(&self) -> ScreenBounds;
    fn pose(&self) -> CameraPose;
    /// Fire-and-forget camera movement request; never awaited
    fn fly_to(&mut self, pose: CameraPose, duration: f32);
}

/// Headless linear camera: scales world offsets from the pose center onto
/// the viewport. Used in tests and as the no-map fallback.
pub struct FixedCamera {
    pose: CameraPose,
    viewport: ScreenBounds,
    /// Screen pixels per world unit at zoom 1
    pixels_per_unit: f32,
}

impl FixedCamera {
    pub fn new(pose: CameraPose, viewport: ScreenBounds) -> Self {
        Self {
            pose,
            viewport,
            pixels_per_unit: 1.0,
        }
    }

    pub fn set_viewport(&mut self, viewport: ScreenBounds) {
        self.viewport = viewport;
    }
}

impl MapCamera for FixedCamera {
    fn project(&self, world: Vec3) -> Option<[f32; 2]> {
        let scale = self.pixels_per_unit * self.pose.zoom.max(0.1);
        let x = (world.x - self.pose.center.x) * scale + self.viewport.width * 0.5;
        let y = (world.y - self.pose.center.y) * scale + self.viewport.height * 0.5;
        if x.is_finite() && y.is_finite() {
            Some([x, y])
        } else {
            None
        }
    }

    fn unproject(&self, screen: [f32; 2]) -> Option<Vec3> {
        let scale = self.pixels_per_unit * self.pose.zoom.max(0.1);
        let x = (screen[0] - self.viewport.width * 0.5) / scale + self.pose.center.x;
        let y = (screen[1] - self.viewport.height * 0.5) / scale + self.pose.center.y;
        if x.is_finite() && y.is_finite() {
            Some(Vec3::new(x, y, 0.0))
        } else {
            None
        }
    }

    fn viewport(&self) -> ScreenBounds {
        self.viewport
    }

    fn pose(&self) -> CameraPose {
        self.pose
    }

    fn fly_to(&mut self, pose: CameraPose, _duration: f32) {
        // Headless camera snaps immediately
        self.pose = pose;
    }
}
