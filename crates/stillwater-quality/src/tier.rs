//! The ordered quality-tier ladder

use serde::{Deserialize, Serialize};
use stillwater_core::{Result, StillwaterError};

/// Global fidelity preset, ordered from lowest to highest.
///
/// The derived `Ord` follows declaration order, so
/// `Minimal < Low < Medium < High < Ultra`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Minimal,
    Low,
    Medium,
    High,
    Ultra,
}

impl QualityTier {
    pub const ALL: [QualityTier; 5] = [
        QualityTier::Minimal,
        QualityTier::Low,
        QualityTier::Medium,
        QualityTier::High,
        QualityTier::Ultra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Minimal => "minimal",
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
            QualityTier::Ultra => "ultra",
        }
    }

    /// Parse a tier name; unknown names are a typed error so callers can
    /// log and no-op instead of changing state.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(QualityTier::Minimal),
            "low" => Ok(QualityTier::Low),
            "medium" => Ok(QualityTier::Medium),
            "high" => Ok(QualityTier::High),
            "ultra" => Ok(QualityTier::Ultra),
            other => Err(StillwaterError::UnknownQualityTier(other.to_string())),
        }
    }

    /// One rung up the ladder; saturates at Ultra
    pub fn step_up(&self) -> Self {
        match self {
            QualityTier::Minimal => QualityTier::Low,
            QualityTier::Low => QualityTier::Medium,
            QualityTier::Medium => QualityTier::High,
            QualityTier::High | QualityTier::Ultra => QualityTier::Ultra,
        }
    }

    /// One rung down the ladder; saturates at Minimal
    pub fn step_down(&self) -> Self {
        match self {
            QualityTier::Ultra => QualityTier::High,
            QualityTier::High => QualityTier::Medium,
            QualityTier::Medium => QualityTier::Low,
            QualityTier::Low | QualityTier::Minimal => QualityTier::Minimal,
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
