//! Core library for the TempStick fleet dashboard.
//!
//! This crate carries the business rules of the system and the HTTP client
//! for the third-party TempStick cloud API:
//!
//! - **Policy** ([`policy`]): the canonical fleet-wide alert thresholds in
//!   Fahrenheit, with a derived Celsius table.
//! - **Evaluation** ([`evaluate`]): per-sensor, per-channel alert status for
//!   the display path. Override-preferring: a valid per-sensor threshold
//!   override wins over the policy default.
//! - **Planning** ([`plan`]): fleet-wide remediation back to the canonical
//!   policy. Override-ignoring: planned settings always reset to policy.
//! - **Fleet view** ([`view`]): search/filter/sort for the dashboard.
//! - **Gateway** ([`gateway`]): the TempStick REST API client.
//!
//! # Quick start
//!
//! ```no_run
//! use tempstick_core::{Gateway, ThresholdPolicy, plan};
//!
//! # async fn example() -> tempstick_core::Result<()> {
//! let gateway = Gateway::from_env()?;
//! let fleet = gateway.fleet().await?;
//!
//! let policy = ThresholdPolicy::default();
//! let updates = plan::plan(&fleet, &policy);
//! println!("{} sensors need realignment checks", updates.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod evaluate;
pub mod gateway;
pub mod plan;
pub mod policy;
pub mod view;

pub use error::{Error, Result};
pub use evaluate::{Channel, EvaluatedRow, ResolvedBand, evaluate, sort_rows};
pub use gateway::Gateway;
pub use plan::{ApplyOutcome, ApplyResult, PlanReport, PlannedUpdate, SettingsWriter};
pub use policy::{Band, ThresholdPolicy};
pub use view::{FleetFilter, NameFilter, build_view};
