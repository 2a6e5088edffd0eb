//! Fleet snapshot export.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tempstick_core::Gateway;
use tempstick_types::{AugmentedSensor, FleetSnapshot};
use tracing::info;

/// Fetch the fleet, augment it with Fahrenheit display values, and write the
/// snapshot to disk for a statically hosted dashboard.
pub async fn cmd_snapshot(gateway: &Gateway, out: &Path) -> Result<()> {
    let fleet = gateway.fleet().await?;
    let items: Vec<AugmentedSensor> = fleet.into_iter().map(AugmentedSensor::from_record).collect();
    let snapshot = FleetSnapshot::new(items);

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;

    info!(
        "wrote {} sensors to {} at {}",
        snapshot.sensor_count,
        out.display(),
        snapshot.generated_at
    );
    Ok(())
}
