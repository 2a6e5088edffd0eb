//! Core records exchanged with the TempStick gateway.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::de;
use crate::units::{self, DISPLAY_PRECISION};

/// Probe capability of a sensor, derived from the gateway's `type` string.
///
/// Only `"EX"` sensors carry the secondary thermocouple (probe) channel;
/// every other type reports ambient temperature only. Settings construction
/// branches on this variant instead of comparing type strings in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    ProbeCapable,
    AmbientOnly,
}

impl SensorKind {
    /// Classify a raw gateway type string.
    #[must_use]
    pub fn from_type(sensor_type: &str) -> Self {
        if sensor_type == "EX" {
            SensorKind::ProbeCapable
        } else {
            SensorKind::AmbientOnly
        }
    }

    #[must_use]
    pub fn is_probe_capable(self) -> bool {
        matches!(self, SensorKind::ProbeCapable)
    }
}

/// A sensor record as reported by the gateway's fleet listing.
///
/// Read-mostly: the dashboard never mutates these, it only derives display
/// rows and planned settings updates from them. Unknown gateway fields are
/// preserved in `extra` so passthrough endpoints and snapshots keep the full
/// payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorRecord {
    #[serde(default)]
    pub sensor_id: String,
    #[serde(default)]
    pub sensor_name: String,
    /// Display SSID; preferred over `sensor_name` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    /// Raw sensor type string; `"EX"` marks probe-capable hardware.
    #[serde(rename = "type", default)]
    pub sensor_type: String,
    /// Last ambient reading in Celsius.
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub last_temp: Option<f64>,
    /// Last probe reading in Celsius; only meaningful on probe-capable types.
    #[serde(rename = "last_tcTemp", default, deserialize_with = "de::lenient_f64")]
    pub last_tc_temp: Option<f64>,
    #[serde(default, deserialize_with = "de::lenient_bool")]
    pub offline: bool,
    /// Per-sensor ambient low override in Celsius, unset when empty.
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub alert_temp_below: Option<f64>,
    /// Per-sensor ambient high override in Celsius.
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub alert_temp_above: Option<f64>,
    /// Per-sensor probe low override in Celsius.
    #[serde(rename = "minTcTemp", default, deserialize_with = "de::lenient_f64")]
    pub min_tc_temp: Option<f64>,
    /// Per-sensor probe high override in Celsius.
    #[serde(rename = "maxTcTemp", default, deserialize_with = "de::lenient_f64")]
    pub max_tc_temp: Option<f64>,
    /// Last check-in timestamp (UTC, gateway formatting).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checkin: Option<String>,
    /// Expected next check-in timestamp (UTC, gateway formatting).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_checkin: Option<String>,
    /// Gateway fields the dashboard does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SensorRecord {
    /// Probe capability of this sensor.
    #[must_use]
    pub fn kind(&self) -> SensorKind {
        SensorKind::from_type(&self.sensor_type)
    }

    /// Name shown in the fleet view: SSID, then name, then id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if let Some(ssid) = self.ssid.as_deref()
            && !ssid.is_empty()
        {
            return ssid;
        }
        if !self.sensor_name.is_empty() {
            return &self.sensor_name;
        }
        &self.sensor_id
    }
}

/// Settings payload for the gateway's sensor-settings mutation.
///
/// Ambient bounds are always present; probe bounds are serialized only when
/// set. The gateway treats an absent field as "leave unchanged", so omission
/// is meaningful and probe fields must never be sent to ambient-only
/// sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSettings {
    /// Ambient low alert bound in Celsius.
    pub alert_temp_below: f64,
    /// Ambient high alert bound in Celsius.
    pub alert_temp_above: f64,
    /// Probe low alert bound in Celsius; probe-capable sensors only.
    #[serde(rename = "minTcTemp", default, skip_serializing_if = "Option::is_none")]
    pub min_tc_temp: Option<f64>,
    /// Probe high alert bound in Celsius; probe-capable sensors only.
    #[serde(rename = "maxTcTemp", default, skip_serializing_if = "Option::is_none")]
    pub max_tc_temp: Option<f64>,
}

impl SensorSettings {
    /// Flatten into form fields for the gateway's form POST.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("alert_temp_below".to_string(), self.alert_temp_below.to_string()),
            ("alert_temp_above".to_string(), self.alert_temp_above.to_string()),
        ];
        if let Some(min) = self.min_tc_temp {
            fields.push(("minTcTemp".to_string(), min.to_string()));
        }
        if let Some(max) = self.max_tc_temp {
            fields.push(("maxTcTemp".to_string(), max.to_string()));
        }
        fields
    }
}

/// The gateway's uniform response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Status discriminator; `"success"` on the happy path.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind == "success"
    }
}

/// Fleet listing payload (the envelope's `data` for `/sensors/all`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorList {
    #[serde(default)]
    pub items: Vec<SensorRecord>,
}

/// A sensor record augmented with derived Fahrenheit display values.
///
/// Mirrors the shape the dashboard frontend consumes: the raw record plus
/// `last_temp_f`, a normalized probe Celsius value, and the probe Fahrenheit
/// value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentedSensor {
    #[serde(flatten)]
    pub sensor: SensorRecord,
    /// Ambient temperature in Fahrenheit at display precision.
    #[serde(default)]
    pub last_temp_f: Option<f64>,
    /// Probe temperature in Celsius, normalized from the raw field.
    #[serde(rename = "last_tcTemp_c", default)]
    pub last_tc_temp_c: Option<f64>,
    /// Probe temperature in Fahrenheit at display precision.
    #[serde(rename = "last_tcTemp_f", default)]
    pub last_tc_temp_f: Option<f64>,
}

impl AugmentedSensor {
    /// Derive display values from a raw record.
    #[must_use]
    pub fn from_record(sensor: SensorRecord) -> Self {
        let last_temp_f = sensor
            .last_temp
            .and_then(|c| units::celsius_to_fahrenheit(c, DISPLAY_PRECISION));
        let last_tc_temp_c = sensor.last_tc_temp;
        let last_tc_temp_f = last_tc_temp_c
            .and_then(|c| units::celsius_to_fahrenheit(c, DISPLAY_PRECISION));
        Self {
            sensor,
            last_temp_f,
            last_tc_temp_c,
            last_tc_temp_f,
        }
    }
}

/// On-disk fleet snapshot written by the CLI `snapshot` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    /// Snapshot creation time, RFC3339.
    pub generated_at: String,
    pub sensor_count: usize,
    pub items: Vec<AugmentedSensor>,
}

impl FleetSnapshot {
    /// Snapshot the given augmented sensors, stamped with the current time.
    #[must_use]
    pub fn new(items: Vec<AugmentedSensor>) -> Self {
        let generated_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        Self {
            generated_at,
            sensor_count: items.len(),
            items,
        }
    }
}
