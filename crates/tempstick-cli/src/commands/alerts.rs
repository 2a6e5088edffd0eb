//! Alert rule commands.

use anyhow::Result;
use tempstick_core::Gateway;

use crate::util::print_json;

pub async fn cmd_alerts(gateway: &Gateway) -> Result<()> {
    print_json(&gateway.alerts().await?)
}

pub async fn cmd_alert(gateway: &Gateway, id: &str) -> Result<()> {
    print_json(&gateway.alert(id).await?)
}
