//! Command implementations for the CLI.

mod alerts;
mod fleet;
mod notifications;
mod settings;
mod snapshot;
mod thresholds;
mod user;

pub use alerts::{cmd_alert, cmd_alerts};
pub use fleet::{cmd_readings, cmd_sensor, cmd_sensors};
pub use notifications::{cmd_sensor_notifications, cmd_user_notifications};
pub use settings::{cmd_update_display, cmd_update_sensor};
pub use snapshot::cmd_snapshot;
pub use thresholds::cmd_apply_thresholds;
pub use user::{cmd_email_reports, cmd_timezones, cmd_user};
