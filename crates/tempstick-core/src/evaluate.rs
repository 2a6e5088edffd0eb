//! Alert evaluation for the fleet view.
//!
//! Evaluation is the display path: it respects per-sensor threshold
//! overrides when present and valid, falling back to the canonical policy
//! otherwise. The remediation path in [`crate::plan`] deliberately ignores
//! overrides; see that module for the asymmetry.
//!
//! Rows are ephemeral. Every render recomputes them from the current fleet
//! snapshot and policy; nothing here is persisted.

use serde::Serialize;
use tempstick_types::units::{
    DISPLAY_PRECISION, SETTINGS_PRECISION, celsius_to_fahrenheit, fahrenheit_to_celsius,
};
use tempstick_types::SensorRecord;

use crate::policy::{Band, ThresholdPolicy};

/// Alert channels on a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Primary/drawer temperature.
    Ambient,
    /// Secondary thermocouple, probe-capable sensors only.
    Probe,
}

/// Ambient overrides at or below this Celsius value are the gateway's
/// "no override configured" sentinel, not a real threshold.
const AMBIENT_DISABLED_SENTINEL_C: f64 = -90.0;

/// An effective alert bound in both units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedBound {
    pub fahrenheit: f64,
    pub celsius: f64,
}

/// Effective thresholds for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedBand {
    pub min: ResolvedBound,
    pub max: ResolvedBound,
}

/// Resolve the effective threshold band for one channel.
///
/// Override-preferring: a valid per-sensor override wins over the policy
/// default. Overrides are stored in Celsius; a usable one is normalized to
/// Fahrenheit at display precision, and the resolved Fahrenheit bound is
/// converted back to Celsius at settings precision so alert comparisons
/// happen in Celsius without amplifying double-rounding error.
#[must_use]
pub fn resolve_effective_threshold(
    sensor: &SensorRecord,
    channel: Channel,
    policy: &ThresholdPolicy,
) -> ResolvedBand {
    let (defaults, low, high): (Band, _, _) = match channel {
        Channel::Ambient => (
            policy.ambient,
            sensor.alert_temp_below,
            sensor.alert_temp_above,
        ),
        Channel::Probe => (policy.probe, sensor.min_tc_temp, sensor.max_tc_temp),
    };
    ResolvedBand {
        min: resolve_bound(low, channel, defaults.min),
        max: resolve_bound(high, channel, defaults.max),
    }
}

fn resolve_bound(override_c: Option<f64>, channel: Channel, default_f: f64) -> ResolvedBound {
    let fahrenheit = override_f(override_c, channel).unwrap_or(default_f);
    ResolvedBound {
        fahrenheit,
        celsius: fahrenheit_to_celsius(fahrenheit, SETTINGS_PRECISION).unwrap_or(fahrenheit),
    }
}

/// Map a raw Celsius override to Fahrenheit, or `None` when it is absent or
/// is the ambient "disabled" sentinel.
fn override_f(raw: Option<f64>, channel: Channel) -> Option<f64> {
    let value = raw?;
    if channel == Channel::Ambient && value <= AMBIENT_DISABLED_SENTINEL_C {
        return None;
    }
    celsius_to_fahrenheit(value, DISPLAY_PRECISION)
}

/// A sensor evaluated against the threshold policy, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluatedRow {
    pub sensor: SensorRecord,
    pub display_name: String,
    pub offline: bool,
    /// Effective ambient thresholds, override or policy.
    pub ambient: ResolvedBand,
    /// Effective probe thresholds, override or policy.
    pub probe: ResolvedBand,
    pub ambient_alert: bool,
    pub probe_alert: bool,
    /// Ambient alert OR probe alert.
    pub row_alert: bool,
    /// The probe channel has data to show: probe-capable type with a
    /// present reading. When false the channel renders as empty.
    pub has_probe: bool,
}

/// Evaluate one sensor against the policy.
///
/// Offline sensors never alert on any channel: their readings are stale,
/// not actionable.
#[must_use]
pub fn evaluate(sensor: &SensorRecord, policy: &ThresholdPolicy) -> EvaluatedRow {
    let ambient = resolve_effective_threshold(sensor, Channel::Ambient, policy);
    let probe = resolve_effective_threshold(sensor, Channel::Probe, policy);

    let offline = sensor.offline;
    let ambient_alert = !offline && out_of_range(sensor.last_temp, &ambient);
    let has_probe = sensor.kind().is_probe_capable() && sensor.last_tc_temp.is_some();
    let probe_alert = has_probe && !offline && out_of_range(sensor.last_tc_temp, &probe);

    EvaluatedRow {
        display_name: sensor.display_name().to_string(),
        offline,
        ambient,
        probe,
        ambient_alert,
        probe_alert,
        row_alert: ambient_alert || probe_alert,
        has_probe,
        sensor: sensor.clone(),
    }
}

/// Alert predicate: a finite Celsius reading strictly outside the band.
/// Readings exactly on a bound do not alert.
fn out_of_range(reading_c: Option<f64>, band: &ResolvedBand) -> bool {
    match reading_c {
        Some(value) if value.is_finite() => {
            value < band.min.celsius || value > band.max.celsius
        }
        _ => false,
    }
}

/// Order rows for the fleet view: alerting sensors first, then
/// case-insensitive display name. The sort is stable, so rows with equal
/// keys keep their original relative order.
pub fn sort_rows(rows: &mut [EvaluatedRow]) {
    rows.sort_by(|a, b| {
        b.row_alert.cmp(&a.row_alert).then_with(|| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(sensor_type: &str) -> SensorRecord {
        SensorRecord {
            sensor_id: "TS-1".into(),
            sensor_name: "Unit".into(),
            sensor_type: sensor_type.into(),
            ..SensorRecord::default()
        }
    }

    fn policy() -> ThresholdPolicy {
        ThresholdPolicy::default()
    }

    #[test]
    fn test_hot_ambient_reading_alerts() {
        // 35 C is the 95 F neighborhood, above the 90 F default max.
        let mut s = sensor("DHT");
        s.last_temp = Some(35.0);
        let row = evaluate(&s, &policy());
        assert!(row.ambient_alert);
        assert!(row.row_alert);
    }

    #[test]
    fn test_reading_exactly_at_max_does_not_alert() {
        // 32.22 C is exactly the 90 F bound; bounds are non-alerting.
        let mut s = sensor("DHT");
        s.last_temp = Some(32.22);
        let row = evaluate(&s, &policy());
        assert!(!row.ambient_alert);

        s.last_temp = Some(32.23);
        assert!(evaluate(&s, &policy()).ambient_alert);
    }

    #[test]
    fn test_offline_suppresses_all_alerts() {
        let mut s = sensor("EX");
        s.last_temp = Some(40.0);
        s.last_tc_temp = Some(40.0);
        s.offline = true;
        let row = evaluate(&s, &policy());
        assert!(!row.ambient_alert);
        assert!(!row.probe_alert);
        assert!(!row.row_alert);
    }

    #[test]
    fn test_missing_reading_never_alerts() {
        let row = evaluate(&sensor("DHT"), &policy());
        assert!(!row.ambient_alert);
        assert!(!row.row_alert);
    }

    #[test]
    fn test_probe_requires_probe_capable_type() {
        let mut s = sensor("DHT");
        s.last_tc_temp = Some(-20.0);
        let row = evaluate(&s, &policy());
        assert!(!row.has_probe);
        assert!(!row.probe_alert);
    }

    #[test]
    fn test_probe_alert_on_probe_capable_sensor() {
        let mut s = sensor("EX");
        s.last_tc_temp = Some(20.0); // 68 F, above the 60 F probe max
        let row = evaluate(&s, &policy());
        assert!(row.has_probe);
        assert!(row.probe_alert);
        assert!(row.row_alert);
    }

    #[test]
    fn test_ambient_sentinel_override_falls_back_to_policy() {
        let mut s = sensor("DHT");
        s.alert_temp_below = Some(-95.0);
        let band = resolve_effective_threshold(&s, Channel::Ambient, &policy());
        assert_eq!(band.min.fahrenheit, 34.0);
    }

    #[test]
    fn test_valid_ambient_override_wins() {
        let mut s = sensor("DHT");
        s.alert_temp_below = Some(0.0); // 32 F
        let band = resolve_effective_threshold(&s, Channel::Ambient, &policy());
        assert_eq!(band.min.fahrenheit, 32.0);
        assert_eq!(band.min.celsius, 0.0);
        // Untouched bound still comes from policy.
        assert_eq!(band.max.fahrenheit, 90.0);
    }

    #[test]
    fn test_probe_override_has_no_sentinel() {
        let mut s = sensor("EX");
        s.min_tc_temp = Some(-95.0);
        let band = resolve_effective_threshold(&s, Channel::Probe, &policy());
        assert_eq!(band.min.fahrenheit, -139.0);
    }

    #[test]
    fn test_override_changes_alert_outcome() {
        let mut s = sensor("DHT");
        s.last_temp = Some(25.0); // fine under policy (77 F)
        s.alert_temp_above = Some(20.0); // but the override caps at 68 F
        let row = evaluate(&s, &policy());
        assert!(row.ambient_alert);
    }

    #[test]
    fn test_sort_alerting_rows_first() {
        let mut zebra = sensor("DHT");
        zebra.ssid = Some("Zebra".into());
        zebra.last_temp = Some(40.0);
        let mut apple = sensor("DHT");
        apple.ssid = Some("Apple".into());
        apple.last_temp = Some(21.0);

        let p = policy();
        let mut rows = vec![evaluate(&apple, &p), evaluate(&zebra, &p)];
        sort_rows(&mut rows);
        assert_eq!(rows[0].display_name, "Zebra");
        assert!(rows[0].row_alert);
        assert_eq!(rows[1].display_name, "Apple");
    }

    #[test]
    fn test_sort_same_status_by_name_case_insensitive() {
        let p = policy();
        let mut names = Vec::new();
        for name in ["delta", "Bravo", "alpha", "Charlie"] {
            let mut s = sensor("DHT");
            s.ssid = Some(name.into());
            names.push(evaluate(&s, &p));
        }
        sort_rows(&mut names);
        let ordered: Vec<_> = names.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(ordered, ["alpha", "Bravo", "Charlie", "delta"]);
    }
}
