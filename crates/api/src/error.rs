use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use newsdesk_core::content::status::TransitionError;
use newsdesk_core::envelope::ApiEnvelope;
use newsdesk_core::store::StoreError;

/// API error type. Every variant renders as the standard
/// `{ success: false, message }` envelope with a matching status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(format!("content {id}")),
            StoreError::Validation(v) => Self::BadRequest(v.to_string()),
            StoreError::NotOwner => Self::Forbidden("only the item's author may do that".to_string()),
            StoreError::EmptyBulk => Self::BadRequest("bulk request contains no ids".to_string()),
            StoreError::Transition(t) => match &t {
                TransitionError::Forbidden { .. } => Self::Forbidden(t.to_string()),
                TransitionError::Illegal { .. } => Self::Conflict(t.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
        };

        let body = ApiEnvelope::<serde_json::Value>::error(message);
        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
