//! Threshold remediation: plan and apply canonical settings fleet-wide.
//!
//! Planning is a forced realignment, not a gap-fill: every sensor's ambient
//! bounds are reset to the canonical policy even when a per-sensor override
//! exists. This is the opposite of the evaluator's override-preferring
//! resolution, and the gateway does not document whether overrides are meant
//! to outlive remediation, so both behaviors are kept exactly as-is rather
//! than reconciled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempstick_types::{ApiEnvelope, SensorKind, SensorRecord, SensorSettings};

use crate::error::Result;
use crate::policy::ThresholdPolicy;

/// Seam for the gateway's settings mutation, injectable in tests.
#[async_trait]
pub trait SettingsWriter {
    /// Send one sensor's settings to the gateway.
    async fn write_settings(
        &self,
        sensor_id: &str,
        settings: &SensorSettings,
    ) -> Result<ApiEnvelope<Value>>;
}

/// One sensor's planned settings change, prior to being sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedUpdate {
    pub sensor_id: String,
    pub sensor_name: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub settings: SensorSettings,
}

/// Build the canonical settings payload for one sensor kind.
///
/// Override-ignoring by design. Ambient bounds are always reset to the
/// policy's Celsius values; probe bounds are included only for probe-capable
/// sensors. Ambient-only sensors must not receive probe fields, since the
/// gateway treats absence as "leave unchanged".
#[must_use]
pub fn build_canonical_settings(kind: SensorKind, policy: &ThresholdPolicy) -> SensorSettings {
    let celsius = policy.celsius();
    SensorSettings {
        alert_temp_below: celsius.ambient.min,
        alert_temp_above: celsius.ambient.max,
        min_tc_temp: kind.is_probe_capable().then_some(celsius.probe.min),
        max_tc_temp: kind.is_probe_capable().then_some(celsius.probe.max),
    }
}

/// Plan canonical settings updates for every sensor in the fleet snapshot.
#[must_use]
pub fn plan(fleet: &[SensorRecord], policy: &ThresholdPolicy) -> Vec<PlannedUpdate> {
    fleet
        .iter()
        .map(|sensor| PlannedUpdate {
            sensor_id: sensor.sensor_id.clone(),
            sensor_name: sensor.sensor_name.clone(),
            sensor_type: sensor.sensor_type.clone(),
            settings: build_canonical_settings(sensor.kind(), policy),
        })
        .collect()
}

/// Outcome classification for one applied update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyOutcome {
    Success,
    Error,
    Unknown,
}

/// Per-sensor result of an apply run, in planned order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResult {
    pub sensor_id: String,
    pub sensor_name: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub outcome: ApplyOutcome,
    pub message: String,
}

/// Apply planned updates strictly sequentially.
///
/// Returns one result per input, in input order. A failed update is
/// recorded and the remaining sensors are still attempted; the batch never
/// aborts early. Sequential on purpose: result ordering stays deterministic
/// and the gateway's unknown rate limits are respected.
pub async fn apply<W: SettingsWriter + Sync>(
    writer: &W,
    updates: &[PlannedUpdate],
) -> Vec<ApplyResult> {
    let mut results = Vec::with_capacity(updates.len());
    for update in updates {
        let (outcome, message) = match writer
            .write_settings(&update.sensor_id, &update.settings)
            .await
        {
            Ok(envelope) => {
                let outcome = match envelope.kind.as_str() {
                    "success" => ApplyOutcome::Success,
                    "error" => ApplyOutcome::Error,
                    _ => ApplyOutcome::Unknown,
                };
                (outcome, envelope.message)
            }
            Err(e) => (ApplyOutcome::Error, e.to_string()),
        };
        tracing::debug!(sensor_id = %update.sensor_id, ?outcome, "applied threshold settings");
        results.push(ApplyResult {
            sensor_id: update.sensor_id.clone(),
            sensor_name: update.sensor_name.clone(),
            sensor_type: update.sensor_type.clone(),
            outcome,
            message,
        });
    }
    results
}

/// Dry-run / apply report shared by the CLI and HTTP surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub applied: bool,
    pub thresholds_fahrenheit: ThresholdPolicy,
    pub thresholds_celsius: ThresholdPolicy,
    pub sensor_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_updates: Option<Vec<PlannedUpdate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ApplyResult>>,
}

impl PlanReport {
    /// Report for a plan that was not sent to the gateway.
    #[must_use]
    pub fn dry_run(policy: &ThresholdPolicy, updates: Vec<PlannedUpdate>) -> Self {
        Self {
            applied: false,
            thresholds_fahrenheit: *policy,
            thresholds_celsius: policy.celsius(),
            sensor_count: updates.len(),
            planned_updates: Some(updates),
            results: None,
        }
    }

    /// Report for an apply run, with per-sensor outcomes.
    #[must_use]
    pub fn applied(policy: &ThresholdPolicy, results: Vec<ApplyResult>) -> Self {
        Self {
            applied: true,
            thresholds_fahrenheit: *policy,
            thresholds_celsius: policy.celsius(),
            sensor_count: results.len(),
            planned_updates: None,
            results: Some(results),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Mutex;

    fn sensor(id: &str, sensor_type: &str) -> SensorRecord {
        SensorRecord {
            sensor_id: id.into(),
            sensor_name: format!("{id} name"),
            sensor_type: sensor_type.into(),
            ..SensorRecord::default()
        }
    }

    #[test]
    fn test_plan_probe_sensor_gets_four_fields() {
        let fleet = [sensor("a", "EX"), sensor("b", "DHT")];
        let updates = plan(&fleet, &ThresholdPolicy::default());
        assert_eq!(updates.len(), 2);

        let probe_fields = updates[0].settings.form_fields();
        assert_eq!(probe_fields.len(), 4);
        let ambient_fields = updates[1].settings.form_fields();
        assert_eq!(ambient_fields.len(), 2);
        assert!(ambient_fields.iter().all(|(k, _)| !k.contains("TcTemp")));
    }

    #[test]
    fn test_plan_overwrites_existing_overrides() {
        let mut s = sensor("a", "DHT");
        s.alert_temp_below = Some(-10.0);
        s.alert_temp_above = Some(50.0);
        let updates = plan(&[s], &ThresholdPolicy::default());
        // Forced realignment: the override is gone, policy values remain.
        assert_eq!(updates[0].settings.alert_temp_below, 1.11);
        assert_eq!(updates[0].settings.alert_temp_above, 32.22);
    }

    #[test]
    fn test_planned_update_serializes_raw_type() {
        let updates = plan(&[sensor("a", "EX")], &ThresholdPolicy::default());
        let value = serde_json::to_value(&updates[0]).unwrap();
        assert_eq!(value["type"], "EX");
        assert_eq!(value["settings"]["minTcTemp"], 1.11);
    }

    /// Scripted gateway fake: pops one outcome per call.
    struct ScriptedWriter {
        script: Mutex<Vec<Result<ApiEnvelope<Value>>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedWriter {
        fn new(script: Vec<Result<ApiEnvelope<Value>>>) -> Self {
            let mut script = script;
            script.reverse();
            Self {
                script: Mutex::new(script),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SettingsWriter for ScriptedWriter {
        async fn write_settings(
            &self,
            sensor_id: &str,
            _settings: &SensorSettings,
        ) -> Result<ApiEnvelope<Value>> {
            self.calls.lock().unwrap().push(sensor_id.to_string());
            self.script.lock().unwrap().pop().expect("script exhausted")
        }
    }

    fn ok_envelope(message: &str) -> Result<ApiEnvelope<Value>> {
        Ok(ApiEnvelope {
            kind: "success".into(),
            message: message.into(),
            data: None,
        })
    }

    #[tokio::test]
    async fn test_apply_collects_partial_failures_in_order() {
        let writer = ScriptedWriter::new(vec![
            ok_envelope("updated"),
            Err(Error::Gateway {
                status: 500,
                message: "boom".into(),
                payload: Value::Null,
            }),
            ok_envelope("updated"),
        ]);
        let fleet = [sensor("a", "EX"), sensor("b", "DHT"), sensor("c", "DHT")];
        let updates = plan(&fleet, &ThresholdPolicy::default());

        let results = apply(&writer, &updates).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].outcome, ApplyOutcome::Success);
        assert_eq!(results[1].outcome, ApplyOutcome::Error);
        assert!(results[1].message.contains("boom"));
        assert_eq!(results[2].outcome, ApplyOutcome::Success);
        // All three sensors were attempted, in planned order.
        assert_eq!(*writer.calls.lock().unwrap(), ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_apply_classifies_gateway_discriminators() {
        let writer = ScriptedWriter::new(vec![
            Ok(ApiEnvelope {
                kind: "error".into(),
                message: "rejected".into(),
                data: None,
            }),
            Ok(ApiEnvelope {
                kind: "weird".into(),
                message: String::new(),
                data: None,
            }),
        ]);
        let updates = plan(
            &[sensor("a", "DHT"), sensor("b", "DHT")],
            &ThresholdPolicy::default(),
        );
        let results = apply(&writer, &updates).await;
        assert_eq!(results[0].outcome, ApplyOutcome::Error);
        assert_eq!(results[1].outcome, ApplyOutcome::Unknown);
    }

    #[test]
    fn test_dry_run_report_shape() {
        let policy = ThresholdPolicy::default();
        let report = PlanReport::dry_run(&policy, plan(&[sensor("a", "EX")], &policy));
        assert!(!report.applied);
        assert_eq!(report.sensor_count, 1);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["thresholds_fahrenheit"]["probe"]["max"], 60.0);
        assert_eq!(value["thresholds_celsius"]["ambient"]["min"], 1.11);
        assert!(value.get("results").is_none());
    }
}
