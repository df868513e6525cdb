//! Stillwater Runtime - the cooperative frame loop's supporting cast
//!
//! Frame clock, typed event bus, the shared visualization context that
//! wires subsystems together, the camera boundary, read-only metrics, and
//! the decorative-noise worker thread.

pub mod camera;
pub mod clock;
pub mod context;
pub mod events;
pub mod metrics;
pub mod noise;
pub mod system;

pub use camera::{CameraPose, FixedCamera, MapCamera};
pub use clock::FrameClock;
pub use context::VizContext;
pub use events::{EventBus, VizEvent};
pub use metrics::Metrics;
pub use noise::{NoiseRequest, NoiseResponse, NoiseWorker};
pub use system::WaterSystem;
