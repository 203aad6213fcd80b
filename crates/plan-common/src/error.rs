use crate::request::MissingFields;

/// Failure outcomes of a plan request.
///
/// Every variant is terminal for the request; nothing is retried or queued.
/// Transport adapters and surfaces map into and out of this type.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("required fields missing: {}", .0.names().join(", "))]
    MissingFields(MissingFields),

    #[error("upstream API error: {0}")]
    Upstream(String),

    #[error("upstream returned no usable content")]
    EmptyResult,

    #[error("internal error: {0}")]
    Internal(String),
}
