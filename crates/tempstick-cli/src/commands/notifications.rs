//! Notification history commands.

use anyhow::Result;
use tempstick_core::Gateway;

use crate::util::{parse_pairs, print_json};

pub async fn cmd_sensor_notifications(
    gateway: &Gateway,
    id: &str,
    params: &[String],
) -> Result<()> {
    let query = parse_pairs(params)?;
    print_json(&gateway.sensor_notifications(id, &query).await?)
}

pub async fn cmd_user_notifications(gateway: &Gateway, params: &[String]) -> Result<()> {
    let query = parse_pairs(params)?;
    print_json(&gateway.user_notifications(&query).await?)
}
