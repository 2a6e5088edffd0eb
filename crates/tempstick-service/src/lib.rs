//! HTTP dashboard and API proxy for the TempStick sensor fleet.
//!
//! The service fronts the third-party TempStick cloud API: it forwards the
//! read endpoints the dashboard needs, augments fleet listings with
//! Fahrenheit display values, serves the evaluated/sorted fleet view, and
//! exposes the threshold plan/apply remediation flow.
//!
//! # REST API Endpoints
//!
//! - `GET /api/health` - Service health check
//! - `GET /api/user` - Current account profile (passthrough)
//! - `GET /api/sensors` - Fleet listing with Fahrenheit augmentation
//! - `GET /api/sensors/view` - Evaluated, filtered, sorted fleet rows
//! - `GET /api/alerts` - Alert listing (passthrough)
//! - `GET /api/notifications` - User notifications (passthrough)
//! - `GET /api/sensor/{id}/notifications` - Per-sensor notifications
//! - `POST /api/sensor/{id}` - Settings update; `*_f` keys are converted
//!   to Celsius before forwarding
//! - `GET /api/thresholds/plan` - Dry-run remediation plan
//! - `POST /api/thresholds/apply` - Plan, and apply when `{"apply": true}`
//!
//! Gateway failures are mirrored: the response carries the gateway's HTTP
//! status and payload when available, else a generic 500.
//!
//! # Configuration
//!
//! The one required secret is the API key, read from the `TEMP_STICK_API`
//! environment variable at startup; a missing key is fatal. Bind address and
//! the optional static-asset directory come from flags or environment
//! (`TEMPSTICK_BIND`, `TEMPSTICK_ASSETS`).

pub mod api;
pub mod state;

pub use state::AppState;
