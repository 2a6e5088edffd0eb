//! Canonical fleet-wide alert thresholds.
//!
//! The Fahrenheit table is the source of truth; the Celsius table is always
//! derived from it so the two cannot drift. There is no runtime mutation
//! API: changing policy means changing the constants and redeploying.

use serde::{Deserialize, Serialize};
use tempstick_types::units::{SETTINGS_PRECISION, fahrenheit_to_celsius};

/// An inclusive alert band. Readings inside `[min, max]` do not alert.
///
/// Invariant: `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(min < max, "band min must be below max");
        Self { min, max }
    }
}

/// Canonical min/max alert thresholds in Fahrenheit, per channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    /// Primary/drawer temperature band.
    pub ambient: Band,
    /// Secondary thermocouple band (probe-capable sensors only).
    pub probe: Band,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            ambient: Band::new(34.0, 90.0),
            probe: Band::new(34.0, 60.0),
        }
    }
}

impl ThresholdPolicy {
    /// Celsius equivalents of the policy, at settings precision.
    #[must_use]
    pub fn celsius(&self) -> ThresholdPolicy {
        ThresholdPolicy {
            ambient: band_to_celsius(self.ambient),
            probe: band_to_celsius(self.probe),
        }
    }
}

fn band_to_celsius(band: Band) -> Band {
    // Policy bounds are finite by construction, so conversion cannot fail.
    Band {
        min: fahrenheit_to_celsius(band.min, SETTINGS_PRECISION).unwrap_or(band.min),
        max: fahrenheit_to_celsius(band.max, SETTINGS_PRECISION).unwrap_or(band.max),
    }
}
