//! REST API endpoints for the dashboard service.
//!
//! Handlers are thin: they forward to the gateway client and the core
//! evaluation/planning logic, and translate failures into mirrored HTTP
//! responses via [`AppError`]. Validation failures are reported before any
//! gateway call is attempted.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use tempstick_core::plan::{PlanReport, apply, plan};
use tempstick_core::view::{FleetFilter, NameFilter, build_view};
use tempstick_core::{Error as CoreError, EvaluatedRow};
use tempstick_types::AugmentedSensor;
use tempstick_types::SensorRecord;
use tempstick_types::units::{SETTINGS_PRECISION, fahrenheit_to_celsius};

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        // Health
        .route("/api/health", get(health))
        // Gateway passthrough
        .route("/api/user", get(get_user))
        .route("/api/alerts", get(get_alerts))
        .route("/api/notifications", get(get_notifications))
        .route(
            "/api/sensor/{id}/notifications",
            get(get_sensor_notifications),
        )
        // Fleet
        .route("/api/sensors", get(get_sensors))
        .route("/api/sensors/view", get(get_sensors_view))
        // Settings and remediation
        .route("/api/sensor/{id}", post(update_sensor))
        .route("/api/thresholds/plan", get(thresholds_plan))
        .route("/api/thresholds/apply", post(thresholds_apply))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Health check endpoint. Does not touch the gateway.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
    })
}

// ==========================================================================
// Gateway passthrough
// ==========================================================================

async fn get_user(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    Ok(Json(state.gateway.current_user().await?))
}

async fn get_alerts(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    Ok(Json(state.gateway.alerts().await?))
}

async fn get_notifications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.gateway.user_notifications(&query).await?))
}

async fn get_sensor_notifications(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.gateway.sensor_notifications(&id, &query).await?))
}

// ==========================================================================
// Fleet
// ==========================================================================

/// Fleet listing with per-sensor Fahrenheit augmentation.
///
/// The gateway payload passes through unchanged apart from `data.items`,
/// where each record gains `last_temp_f`, `last_tcTemp_c`, and
/// `last_tcTemp_f` display values.
async fn get_sensors(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let mut payload = state.gateway.sensors().await?;
    if let Some(items) = payload.pointer_mut("/data/items")
        && let Ok(records) = serde_json::from_value::<Vec<SensorRecord>>(items.clone())
    {
        let augmented: Vec<AugmentedSensor> = records
            .into_iter()
            .map(AugmentedSensor::from_record)
            .collect();
        *items = serde_json::to_value(augmented)
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }
    Ok(Json(payload))
}

/// Query parameters for the fleet view.
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    #[serde(default)]
    pub search: Option<String>,
    /// Name filter mode: `all` (default), `prefix`, or `contains`.
    #[serde(default)]
    pub filter: Option<String>,
    /// Text for the `prefix`/`contains` filter modes.
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub hide_offline: Option<String>,
}

impl ViewParams {
    /// Validate and convert into a core fleet filter.
    fn into_filter(self) -> Result<FleetFilter, AppError> {
        let term = self.term.unwrap_or_default();
        let name_filter = match self.filter.as_deref().unwrap_or("all") {
            "all" => NameFilter::All,
            "prefix" => NameFilter::Prefix(term),
            "contains" => NameFilter::Contains(term),
            other => {
                return Err(AppError::BadRequest(format!(
                    "unknown filter mode '{other}': expected all, prefix, or contains"
                )));
            }
        };
        Ok(FleetFilter {
            search: self.search.unwrap_or_default(),
            name_filter,
            hide_offline: parse_flag(self.hide_offline.as_deref()),
        })
    }
}

/// Lenient boolean flag parsing for query strings.
fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(str::to_ascii_lowercase).as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}

/// Evaluated fleet view response.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub count: usize,
    pub total: usize,
    pub rows: Vec<EvaluatedRow>,
}

/// Evaluated, filtered, sorted fleet rows.
async fn get_sensors_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Result<Json<ViewResponse>, AppError> {
    let filter = params.into_filter()?;
    let fleet = state.gateway.fleet().await?;
    let rows = build_view(&fleet, &state.policy, &filter);
    Ok(Json(ViewResponse {
        count: rows.len(),
        total: fleet.len(),
        rows,
    }))
}

// ==========================================================================
// Settings and remediation
// ==========================================================================

/// Keys the dashboard may send in Fahrenheit, and their Celsius targets.
const FAHRENHEIT_KEYS: [(&str, &str); 4] = [
    ("alert_temp_below_f", "alert_temp_below"),
    ("alert_temp_above_f", "alert_temp_above"),
    ("minTcTemp_f", "minTcTemp"),
    ("maxTcTemp_f", "maxTcTemp"),
];

/// Convert any `*_f` threshold keys in a settings body to Celsius.
fn convert_fahrenheit_fields(mut body: Map<String, Value>) -> Result<Map<String, Value>, AppError> {
    for (f_key, c_key) in FAHRENHEIT_KEYS {
        let Some(raw) = body.remove(f_key) else {
            continue;
        };
        let fahrenheit = value_as_f64(&raw).ok_or_else(|| {
            AppError::BadRequest(format!("{f_key} must be a number, got {raw}"))
        })?;
        let celsius = fahrenheit_to_celsius(fahrenheit, SETTINGS_PRECISION)
            .ok_or_else(|| AppError::BadRequest(format!("{f_key} must be finite")))?;
        body.insert(c_key.to_string(), json!(celsius));
    }
    Ok(body)
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Flatten a JSON settings body into gateway form fields.
fn body_to_form_fields(body: &Map<String, Value>) -> Result<Vec<(String, String)>, AppError> {
    let mut fields = Vec::with_capacity(body.len());
    for (key, value) in body {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Value::Null => continue,
            other => {
                return Err(AppError::BadRequest(format!(
                    "setting '{key}' must be a scalar, got {other}"
                )));
            }
        };
        fields.push((key.clone(), text));
    }
    Ok(fields)
}

/// Settings proxy: convert `*_f` keys, then forward as a form POST.
async fn update_sensor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Value>, AppError> {
    if body.is_empty() {
        return Err(AppError::BadRequest("settings body is empty".to_string()));
    }
    let body = convert_fahrenheit_fields(body)?;
    let fields = body_to_form_fields(&body)?;
    let envelope = state.gateway.update_sensor_fields(&id, &fields).await?;
    Ok(Json(serde_json::to_value(envelope).map_err(|e| {
        AppError::Internal(e.to_string())
    })?))
}

/// Dry-run remediation plan for the whole fleet.
async fn thresholds_plan(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PlanReport>, AppError> {
    let fleet = state.gateway.fleet().await?;
    let updates = plan(&fleet, &state.policy);
    Ok(Json(PlanReport::dry_run(&state.policy, updates)))
}

/// Request body for the apply endpoint. Defaults to the safe dry-run mode.
#[derive(Debug, Default, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub apply: bool,
}

/// Plan, and apply when explicitly requested.
async fn thresholds_apply(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ApplyRequest>>,
) -> Result<Json<PlanReport>, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let fleet = state.gateway.fleet().await?;
    let updates = plan(&fleet, &state.policy);

    if !request.apply {
        return Ok(Json(PlanReport::dry_run(&state.policy, updates)));
    }

    let results = apply(&state.gateway, &updates).await;
    Ok(Json(PlanReport::applied(&state.policy, results)))
}

// ==========================================================================
// Error mapping
// ==========================================================================

/// Error responses for the HTTP surface.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request input; reported before any gateway call.
    BadRequest(String),
    /// A gateway call failed; the gateway's status and payload are mirrored
    /// when available.
    Gateway(CoreError),
    Internal(String),
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError::Gateway(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            AppError::Gateway(err) => {
                let status = err
                    .status()
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = err
                    .payload()
                    .cloned()
                    .unwrap_or_else(|| json!({ "error": err.to_string() }));
                (status, body)
            }
            AppError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tempstick_core::Gateway;
    use tower::ServiceExt;

    fn create_test_state() -> Arc<AppState> {
        // Points at a closed port; tests below never reach the gateway.
        let gateway = Gateway::with_base_url("test-key", "http://127.0.0.1:9").unwrap();
        AppState::new(gateway)
    }

    async fn response_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = router().with_state(create_test_state());
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_body(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_view_rejects_unknown_filter_mode() {
        let app = router().with_state(create_test_state());
        let response = app
            .oneshot(
                Request::get("/api/sensors/view?filter=bogus")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("bogus"));
    }

    #[tokio::test]
    async fn test_update_sensor_rejects_empty_body() {
        let app = router().with_state(create_test_state());
        let response = app
            .oneshot(
                Request::post("/api/sensor/TS-1")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_view_params_into_filter() {
        let params = ViewParams {
            search: Some("medic".into()),
            filter: Some("prefix".into()),
            term: Some("medic".into()),
            hide_offline: Some("1".into()),
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter.search, "medic");
        assert_eq!(filter.name_filter, NameFilter::Prefix("medic".into()));
        assert!(filter.hide_offline);
    }

    #[test]
    fn test_parse_flag_variants() {
        assert!(parse_flag(Some("1")));
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("TRUE")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_convert_fahrenheit_fields() {
        let body: Map<String, Value> = serde_json::from_value(json!({
            "alert_temp_below_f": 34,
            "alert_temp_above_f": "90",
            "use_alert_interval": 1
        }))
        .unwrap();
        let converted = convert_fahrenheit_fields(body).unwrap();
        assert_eq!(converted["alert_temp_below"], json!(1.11));
        assert_eq!(converted["alert_temp_above"], json!(32.22));
        assert!(!converted.contains_key("alert_temp_below_f"));
        assert_eq!(converted["use_alert_interval"], json!(1));
    }

    #[test]
    fn test_convert_fahrenheit_rejects_non_numeric() {
        let body: Map<String, Value> =
            serde_json::from_value(json!({ "minTcTemp_f": "warm" })).unwrap();
        assert!(matches!(
            convert_fahrenheit_fields(body),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_body_to_form_fields_scalars() {
        let body: Map<String, Value> = serde_json::from_value(json!({
            "alert_temp_above": 32.22,
            "send_alerts": true,
            "label": "drawer",
            "unused": null
        }))
        .unwrap();
        let fields = body_to_form_fields(&body).unwrap();
        assert_eq!(fields.len(), 3);
        assert!(fields.contains(&("send_alerts".to_string(), "1".to_string())));
    }

    #[test]
    fn test_app_error_mirrors_gateway_status() {
        let err = AppError::Gateway(CoreError::Gateway {
            status: 403,
            message: "forbidden".into(),
            payload: json!({ "type": "error", "message": "forbidden" }),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_app_error_defaults_to_internal() {
        let err = AppError::Gateway(CoreError::Validation("bad".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
