//! Stillwater Quality - adaptive fidelity management
//!
//! A closed ladder of quality tiers, a startup device profiler that picks
//! the initial tier, a rolling FPS sampler, and the governor state machine
//! that interpolates settings during tier transitions and steps the ladder
//! in response to sustained performance readings.

pub mod governor;
pub mod perf;
pub mod profile;
pub mod settings;
pub mod tier;

pub use governor::{QualityGovernor, QualityUpdate, UpdatePhase};
pub use perf::FpsSampler;
pub use profile::{DeviceProfile, GpuClass};
pub use settings::QualitySettings;
pub use tier::QualityTier;
