//! Fleet-wide threshold realignment.

use anyhow::Result;
use tempstick_core::plan::{PlanReport, apply, plan};
use tempstick_core::{Gateway, ThresholdPolicy};
use tracing::info;

use crate::util::print_json;

/// Plan canonical settings for every sensor; send them only with `--apply`.
pub async fn cmd_apply_thresholds(gateway: &Gateway, send: bool) -> Result<()> {
    let policy = ThresholdPolicy::default();
    let fleet = gateway.fleet().await?;
    let updates = plan(&fleet, &policy);

    if !send {
        info!("dry run: pass --apply to send {} updates", updates.len());
        return print_json(&PlanReport::dry_run(&policy, updates));
    }

    let results = apply(gateway, &updates).await;
    print_json(&PlanReport::applied(&policy, results))
}
