//! Account commands.

use anyhow::Result;
use tempstick_core::Gateway;

use crate::util::print_json;

pub async fn cmd_user(gateway: &Gateway) -> Result<()> {
    print_json(&gateway.current_user().await?)
}

pub async fn cmd_email_reports(gateway: &Gateway) -> Result<()> {
    print_json(&gateway.email_reports().await?)
}

pub async fn cmd_timezones(gateway: &Gateway) -> Result<()> {
    print_json(&gateway.allowed_timezones().await?)
}
