//! Data model for the TempStick sensor fleet dashboard.
//!
//! This crate holds everything the dashboard exchanges with the TempStick
//! cloud gateway, plus the pure unit conversions that sit under all of the
//! alert logic:
//!
//! - **Records**: [`SensorRecord`] (the gateway's fleet listing rows),
//!   [`SensorSettings`] (the settings-mutation payload), [`ApiEnvelope`]
//!   (the gateway's uniform response shape).
//! - **Derived views**: [`AugmentedSensor`] (record plus Fahrenheit display
//!   values) and [`FleetSnapshot`] (the on-disk snapshot format).
//! - **Conversions**: [`units`] — Celsius⇄Fahrenheit with the rounding
//!   contract the gateway applies to stored settings.
//!
//! The gateway's JSON is stringly typed: numbers arrive as numbers or as
//! strings depending on field and firmware revision, unset values are empty
//! strings, and the offline flag is `"0"`/`"1"`. The [`de`] module holds the
//! lenient deserializers that normalize all of that so the rest of the
//! workspace only ever sees `Option<f64>` and `bool`.

pub mod de;
pub mod types;
pub mod units;

pub use types::{
    ApiEnvelope, AugmentedSensor, FleetSnapshot, SensorKind, SensorList, SensorRecord,
    SensorSettings,
};
