//! HTTP client for the TempStick cloud API.
//!
//! Thin, blocking-free wrapper over the third-party REST API. Every call is
//! one request/response exchange; there is no retry or backoff layer, and
//! any timeout beyond reqwest's defaults is the caller's concern.
//!
//! Endpoints the dashboard only passes through are exposed as raw
//! [`serde_json::Value`]s; the fleet listing and the settings mutation, which
//! the core logic consumes, also have typed accessors.
//!
//! # Example
//!
//! ```no_run
//! use tempstick_core::Gateway;
//!
//! # async fn example() -> tempstick_core::Result<()> {
//! let gateway = Gateway::from_env()?;
//! for sensor in gateway.fleet().await? {
//!     println!("{}: {:?} C", sensor.display_name(), sensor.last_temp);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tempstick_types::{ApiEnvelope, SensorList, SensorRecord, SensorSettings};

use crate::error::{Error, Result};
use crate::plan::SettingsWriter;

/// Default base URL for the TempStick REST API.
pub const DEFAULT_BASE_URL: &str = "https://tempstickapi.com/api/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TEMP_STICK_API";

const USER_AGENT: &str = concat!("tempstick-dashboard/", env!("CARGO_PKG_VERSION"));

/// Maximum body length kept when reporting a non-JSON response.
const BODY_SNIPPET_LEN: usize = 512;

/// Query parameters as key/value pairs. Pairs with empty values are skipped,
/// matching the gateway's expectation that unset filters are simply absent.
pub type QueryPairs = Vec<(String, String)>;

/// Client for the TempStick gateway.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Gateway {
    /// Create a client against the production API.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against an alternate base URL (tests, staging).
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Validation(format!(
                "base URL must start with http:// or https://, got: {base_url}"
            )));
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Transport {
                url: base_url.clone(),
                source: e,
            })?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Build a client from the environment. A missing or empty API key is a
    /// startup error, not something to discover on the first request.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;
        Self::new(api_key)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ======================================================================
    // Fleet
    // ======================================================================

    /// Raw fleet listing response, as the gateway sent it.
    pub async fn sensors(&self) -> Result<Value> {
        self.get("/sensors/all", &[]).await
    }

    /// Fleet listing parsed to records. Missing `data.items` reads as an
    /// empty fleet.
    pub async fn fleet(&self) -> Result<Vec<SensorRecord>> {
        let envelope: ApiEnvelope<SensorList> =
            serde_json::from_value(self.sensors().await?)?;
        Ok(envelope.data.map(|list| list.items).unwrap_or_default())
    }

    /// Single sensor detail.
    pub async fn sensor(&self, sensor_id: &str) -> Result<Value> {
        self.get(&format!("/sensor/{sensor_id}"), &[]).await
    }

    /// Readings history for a sensor.
    pub async fn sensor_readings(&self, sensor_id: &str, query: &[(String, String)]) -> Result<Value> {
        self.get(&format!("/sensor/{sensor_id}/readings"), query).await
    }

    // ======================================================================
    // Alerts and notifications
    // ======================================================================

    pub async fn alerts(&self) -> Result<Value> {
        self.get("/alerts/all", &[]).await
    }

    pub async fn alert(&self, alert_id: &str) -> Result<Value> {
        self.get(&format!("/alerts/{alert_id}"), &[]).await
    }

    pub async fn sensor_notifications(
        &self,
        sensor_id: &str,
        query: &[(String, String)],
    ) -> Result<Value> {
        self.get(&format!("/sensor/notifications/{sensor_id}"), query).await
    }

    pub async fn user_notifications(&self, query: &[(String, String)]) -> Result<Value> {
        self.get("/user/notifications", query).await
    }

    // ======================================================================
    // User and account
    // ======================================================================

    pub async fn current_user(&self) -> Result<Value> {
        self.get("/user", &[]).await
    }

    pub async fn email_reports(&self) -> Result<Value> {
        self.get("/user/email-reports", &[]).await
    }

    pub async fn allowed_timezones(&self) -> Result<Value> {
        self.get("/user/allowed-timezones", &[]).await
    }

    // ======================================================================
    // Mutations
    // ======================================================================

    /// Update sensor settings from raw form fields.
    pub async fn update_sensor_fields(
        &self,
        sensor_id: &str,
        fields: &[(String, String)],
    ) -> Result<ApiEnvelope<Value>> {
        let payload = self
            .request(Method::POST, &format!("/sensor/{sensor_id}"), &[], Some(fields))
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Update the account's display preferences from raw form fields.
    pub async fn update_display_preferences(
        &self,
        fields: &[(String, String)],
    ) -> Result<ApiEnvelope<Value>> {
        let payload = self
            .request(Method::POST, "/user/display-preferences", &[], Some(fields))
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    // ======================================================================
    // Internal HTTP helpers
    // ======================================================================

    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        self.request(Method::GET, path, query, None).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        form: Option<&[(String, String)]>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        let query: Vec<_> = query.iter().filter(|(_, v)| !v.is_empty()).collect();
        let mut request = self
            .client
            .request(method, &url)
            .header("X-API-KEY", &self.api_key)
            .query(&query);

        if let Some(fields) = form {
            let mut multipart = reqwest::multipart::Form::new();
            for (key, value) in fields {
                multipart = multipart.text(key.clone(), value.clone());
            }
            request = request.multipart(multipart);
        }

        let response = request.send().await.map_err(|e| Error::Transport {
            url: url.clone(),
            source: e,
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| Error::Transport {
            url: url.clone(),
            source: e,
        })?;

        let payload: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) => {
                // The gateway occasionally serves HTML error pages; keep a
                // snippet for diagnosis instead of the whole document.
                let mut snippet = body;
                snippet.truncate(BODY_SNIPPET_LEN);
                return Err(Error::InvalidResponse {
                    status: status.as_u16(),
                    body: snippet,
                });
            }
        };

        if !status.is_success() {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(Error::Gateway {
                status: status.as_u16(),
                message,
                payload,
            });
        }

        Ok(payload)
    }
}

#[async_trait]
impl SettingsWriter for Gateway {
    async fn write_settings(
        &self,
        sensor_id: &str,
        settings: &SensorSettings,
    ) -> Result<ApiEnvelope<Value>> {
        self.update_sensor_fields(sensor_id, &settings.form_fields()).await
    }
}
