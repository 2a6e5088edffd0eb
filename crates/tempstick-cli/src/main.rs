//! `tempstick` - command-line access to the TempStick sensor fleet.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tempstick_core::Gateway;

mod cli;
mod commands;
mod util;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            // Surface the raw gateway payload when one came back.
            if let Some(payload) = err
                .downcast_ref::<tempstick_core::Error>()
                .and_then(tempstick_core::Error::payload)
                && let Ok(pretty) = serde_json::to_string_pretty(payload)
            {
                eprintln!("{pretty}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    let gateway = Gateway::from_env()?;

    match command {
        Commands::Sensors => commands::cmd_sensors(&gateway).await,
        Commands::Sensor { id } => commands::cmd_sensor(&gateway, &id).await,
        Commands::Readings { id, params } => {
            commands::cmd_readings(&gateway, &id, &params).await
        }
        Commands::Alerts => commands::cmd_alerts(&gateway).await,
        Commands::Alert { id } => commands::cmd_alert(&gateway, &id).await,
        Commands::SensorNotifications { id, params } => {
            commands::cmd_sensor_notifications(&gateway, &id, &params).await
        }
        Commands::UserNotifications { params } => {
            commands::cmd_user_notifications(&gateway, &params).await
        }
        Commands::User => commands::cmd_user(&gateway).await,
        Commands::EmailReports => commands::cmd_email_reports(&gateway).await,
        Commands::Timezones => commands::cmd_timezones(&gateway).await,
        Commands::UpdateSensor { id, settings } => {
            commands::cmd_update_sensor(&gateway, &id, &settings).await
        }
        Commands::UpdateDisplay { settings } => {
            commands::cmd_update_display(&gateway, &settings).await
        }
        Commands::ApplyThresholds { apply } => {
            commands::cmd_apply_thresholds(&gateway, apply).await
        }
        Commands::Snapshot { out } => commands::cmd_snapshot(&gateway, &out).await,
    }
}
