//! Fleet view assembly: filter, evaluate, sort.
//!
//! This is the data side of the dashboard's fleet listing. The visual layer
//! only renders what comes out of [`build_view`]; all selection semantics
//! live here so they are testable without a browser.

use serde::{Deserialize, Serialize};
use tempstick_types::SensorRecord;

use crate::evaluate::{EvaluatedRow, evaluate, sort_rows};
use crate::policy::ThresholdPolicy;

/// Display-name filter modes offered by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameFilter {
    /// No name filtering.
    #[default]
    All,
    /// SSID must start with the given text (case-insensitive).
    Prefix(String),
    /// SSID must contain the given text (case-insensitive).
    Contains(String),
}

impl NameFilter {
    fn matches(&self, sensor: &SensorRecord) -> bool {
        let ssid = sensor.ssid.as_deref().unwrap_or("").to_lowercase();
        match self {
            NameFilter::All => true,
            NameFilter::Prefix(prefix) => ssid.starts_with(&prefix.to_lowercase()),
            NameFilter::Contains(needle) => ssid.contains(&needle.to_lowercase()),
        }
    }
}

/// Fleet view filter: free-text search, name filter mode, offline toggle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetFilter {
    /// Case-insensitive substring search over ssid, name, id, and type.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub name_filter: NameFilter,
    #[serde(default)]
    pub hide_offline: bool,
}

impl FleetFilter {
    /// Whether a sensor passes every active filter.
    #[must_use]
    pub fn matches(&self, sensor: &SensorRecord) -> bool {
        if !self.name_filter.matches(sensor) {
            return false;
        }
        if self.hide_offline && sensor.offline {
            return false;
        }
        let search = self.search.trim().to_lowercase();
        if search.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {} {} {}",
            sensor.ssid.as_deref().unwrap_or(""),
            sensor.sensor_name,
            sensor.sensor_id,
            sensor.sensor_type
        )
        .to_lowercase();
        haystack.contains(&search)
    }
}

/// Evaluate, filter, and sort a fleet snapshot for display.
#[must_use]
pub fn build_view(
    sensors: &[SensorRecord],
    policy: &ThresholdPolicy,
    filter: &FleetFilter,
) -> Vec<EvaluatedRow> {
    let mut rows: Vec<EvaluatedRow> = sensors
        .iter()
        .filter(|sensor| filter.matches(sensor))
        .map(|sensor| evaluate(sensor, policy))
        .collect();
    sort_rows(&mut rows);
    rows
}
