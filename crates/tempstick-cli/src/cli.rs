//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tempstick")]
#[command(author, version, about = "CLI for the TempStick sensor fleet", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every sensor on the account
    Sensors,

    /// Show one sensor's detail
    Sensor {
        /// Sensor id
        id: String,
    },

    /// Readings history for a sensor, with Fahrenheit added per reading
    Readings {
        /// Sensor id
        id: String,

        /// Query filters as key=value pairs (e.g. setting=24_hours)
        params: Vec<String>,
    },

    /// List alert rules
    Alerts,

    /// Show one alert rule
    Alert {
        /// Alert id
        id: String,
    },

    /// Notification history for a sensor
    SensorNotifications {
        /// Sensor id
        id: String,

        /// Query filters as key=value pairs (e.g. page=2 items_per_page=50)
        params: Vec<String>,
    },

    /// Notification history for the account
    UserNotifications {
        /// Query filters as key=value pairs
        params: Vec<String>,
    },

    /// Current account profile
    User,

    /// Scheduled email report settings
    EmailReports,

    /// Timezones the gateway accepts
    Timezones,

    /// Update one sensor's settings
    UpdateSensor {
        /// Sensor id
        id: String,

        /// Settings as key=value pairs; true/false encode as 1/0
        #[arg(required = true)]
        settings: Vec<String>,
    },

    /// Update account display preferences
    UpdateDisplay {
        /// Preferences as key=value pairs; true/false encode as 1/0
        #[arg(required = true)]
        settings: Vec<String>,
    },

    /// Realign the whole fleet to the canonical alert thresholds
    ApplyThresholds {
        /// Send the planned updates to the gateway (default is dry run)
        #[arg(long)]
        apply: bool,
    },

    /// Write a fleet snapshot with Fahrenheit display values to disk
    Snapshot {
        /// Output path
        #[arg(short, long, default_value = "assets/data.json")]
        out: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_update_sensor_requires_settings() {
        let result = Cli::try_parse_from(["tempstick", "update-sensor", "TS-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_thresholds_defaults_to_dry_run() {
        let cli = Cli::try_parse_from(["tempstick", "apply-thresholds"]).unwrap();
        match cli.command {
            Commands::ApplyThresholds { apply } => assert!(!apply),
            _ => panic!("wrong command"),
        }
    }
}
