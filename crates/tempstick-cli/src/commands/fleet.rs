//! Fleet listing, sensor detail, and readings commands.

use anyhow::Result;
use serde_json::{Value, json};
use tempstick_core::Gateway;
use tempstick_types::units::{DISPLAY_PRECISION, celsius_to_fahrenheit};

use crate::util::{parse_pairs, print_json};

pub async fn cmd_sensors(gateway: &Gateway) -> Result<()> {
    print_json(&gateway.sensors().await?)
}

pub async fn cmd_sensor(gateway: &Gateway, id: &str) -> Result<()> {
    print_json(&gateway.sensor(id).await?)
}

/// Readings history with a `temperature_f` display value added per reading.
pub async fn cmd_readings(gateway: &Gateway, id: &str, params: &[String]) -> Result<()> {
    let query = parse_pairs(params)?;
    let mut payload = gateway.sensor_readings(id, &query).await?;
    if let Some(readings) = readings_array(&mut payload) {
        for reading in readings {
            augment_reading(reading);
        }
    }
    print_json(&payload)
}

/// Locate the readings array: the gateway nests it under `data` directly or
/// under `data.readings` depending on the query.
fn readings_array(payload: &mut Value) -> Option<&mut Vec<Value>> {
    if payload.pointer("/data").is_some_and(Value::is_array) {
        return payload.pointer_mut("/data").and_then(Value::as_array_mut);
    }
    payload
        .pointer_mut("/data/readings")
        .and_then(Value::as_array_mut)
}

fn augment_reading(reading: &mut Value) {
    let Some(celsius) = reading.get("temperature").and_then(value_as_f64) else {
        return;
    };
    if let Some(fahrenheit) = celsius_to_fahrenheit(celsius, DISPLAY_PRECISION)
        && let Some(object) = reading.as_object_mut()
    {
        object.insert("temperature_f".to_string(), json!(fahrenheit));
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
