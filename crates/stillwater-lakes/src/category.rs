//! Lake categories and the closed flow/boundary behavior enums

use serde::{Deserialize, Serialize};

/// Water-body category driving default particle behavior.
///
/// Free-text lake "type" strings from site data are normalized onto this
/// set via [`LakeCategory::from_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LakeCategory {
    Freshwater,
    Salt,
    HighAltitude,
    Sacred,
    Brackish,
    Urban,
}

impl LakeCategory {
    /// Normalize a free-text type label via substring matching.
    ///
    /// Unmatched labels default to Freshwater.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("glacial") || lower.contains("alpine") || lower.contains("high altitude")
        {
            LakeCategory::HighAltitude
        } else if lower.contains("salt") || lower.contains("saline") || lower.contains("soda") {
            LakeCategory::Salt
        } else if lower.contains("sacred") || lower.contains("holy") || lower.contains("crater") {
            LakeCategory::Sacred
        } else if lower.contains("brackish") || lower.contains("lagoon") || lower.contains("delta")
        {
            LakeCategory::Brackish
        } else if lower.contains("urban") || lower.contains("reservoir") || lower.contains("city")
        {
            LakeCategory::Urban
        } else {
            LakeCategory::Freshwater
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LakeCategory::Freshwater => "freshwater",
            LakeCategory::Salt => "salt",
            LakeCategory::HighAltitude => "high_altitude",
            LakeCategory::Sacred => "sacred",
            LakeCategory::Brackish => "brackish",
            LakeCategory::Urban => "urban",
        }
    }
}

impl Default for LakeCategory {
    fn default() -> Self {
        LakeCategory::Freshwater
    }
}

/// Velocity-field pattern selected per lake type.
///
/// A closed set dispatched via match rather than a string-keyed registry,
/// so pattern selection is exhaustiveness-checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPatternKind {
    /// Gentle meandering drift (freshwater default)
    Drift,
    /// Slow periodic push-pull along one axis (salt flats, tides)
    Tidal,
    /// Inward spiral around the lake center (sacred/crater lakes)
    Spiral,
    /// Near-still water with faint convection (high-altitude lakes)
    Still,
    /// Layered shear where fresh and salt water mix (brackish)
    Shear,
    /// Short choppy oscillations (urban reservoirs)
    Chop,
}

/// Policy governing particle behavior at the edge of a lake's domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Velocity sign flip plus position clamp at the crossed edge
    Reflect,
    /// Progressive slow-down and fade in a margin band; respawn if outside
    Absorb,
    /// Slowdown near the margin, then a chance to fully stop for a while
    Freeze,
    /// Tangential force plus weak centripetal pull far from center
    Orbit,
    /// Near-boundary velocity jitter with occasional swirl episodes
    Turbulent,
}
