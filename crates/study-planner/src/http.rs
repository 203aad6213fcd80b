//! JSON API for browser clients.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use plan_common::error::PlanError;
use plan_common::export::{extract_plain_text, TEXT_EXPORT_FILENAME};
use plan_common::planner::{GeneratedPlan, Planner};
use plan_common::request::{MissingFields, PlanInput};

pub fn router(planner: Planner) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate-plan", post(generate_plan))
        .route("/api/export/text", post(export_text))
        .with_state(planner)
}

async fn health() -> &'static str {
    "ok"
}

/// The body is parsed by hand so malformed JSON reports as an internal error
/// in the same `{error, details}` shape as every other failure.
async fn generate_plan(
    State(planner): State<Planner>,
    body: Bytes,
) -> Result<Json<GeneratedPlan>, ApiError> {
    let input: PlanInput = serde_json::from_slice(&body)
        .map_err(|e| PlanError::Internal(format!("malformed request body: {e}")))?;
    Ok(Json(planner.generate(input).await?))
}

#[derive(Debug, Deserialize)]
struct ExportRequest {
    #[serde(default)]
    plan: Option<String>,
}

async fn export_text(body: Bytes) -> Result<Response, ApiError> {
    let request: ExportRequest = serde_json::from_slice(&body)
        .map_err(|e| PlanError::Internal(format!("malformed request body: {e}")))?;
    let plan = request
        .plan
        .filter(|p| !p.trim().is_empty())
        .ok_or(ApiError::BadRequest("plan is required"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{TEXT_EXPORT_FILENAME}\""),
            ),
        ],
        extract_plain_text(&plan),
    )
        .into_response())
}

#[derive(Debug)]
pub enum ApiError {
    Plan(PlanError),
    BadRequest(&'static str),
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        ApiError::Plan(err)
    }
}

fn field_detail(missing: bool, label: &str) -> String {
    if missing {
        format!("{label} is required")
    } else {
        "Valid".to_string()
    }
}

fn missing_fields_body(missing: &MissingFields) -> serde_json::Value {
    json!({
        "error": "Required fields missing. Please provide subject, duration, and hours per day.",
        "details": {
            "subject": field_detail(missing.subject, "Subject"),
            "duration": field_detail(missing.duration, "Duration"),
            "hoursPerDay": field_detail(missing.hours_per_day, "Hours per day"),
        }
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message, "details": message }),
            ),
            ApiError::Plan(PlanError::MissingFields(missing)) => {
                (StatusCode::BAD_REQUEST, missing_fields_body(&missing))
            }
            ApiError::Plan(PlanError::Upstream(message)) => {
                error!(error = %message, "external API service error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "External API service error", "details": message }),
                )
            }
            ApiError::Plan(PlanError::EmptyResult) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "No learning plan generated",
                    "details": "The AI service returned an empty response",
                }),
            ),
            ApiError::Plan(PlanError::Internal(cause)) => {
                error!(error = %cause, "error generating learning plan");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal server error",
                        "details": "Failed to process learning plan generation request",
                    }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
