//! Settings mutation commands.

use anyhow::{Result, bail};
use tempstick_core::Gateway;

use crate::util::{parse_pairs, print_json};

pub async fn cmd_update_sensor(gateway: &Gateway, id: &str, settings: &[String]) -> Result<()> {
    let fields = parse_pairs(settings)?;
    if fields.is_empty() {
        bail!("update-sensor needs at least one key=value pair");
    }
    print_json(&gateway.update_sensor_fields(id, &fields).await?)
}

pub async fn cmd_update_display(gateway: &Gateway, settings: &[String]) -> Result<()> {
    let fields = parse_pairs(settings)?;
    if fields.is_empty() {
        bail!("update-display needs at least one key=value pair");
    }
    print_json(&gateway.update_display_preferences(&fields).await?)
}
