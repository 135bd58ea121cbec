//! The uniform JSON envelope spoken on every Newsdesk endpoint:
//! `{ "success": bool, "message"?: string, "data"?: T }`.
//!
//! Responses are normalized here, at the boundary, so callers never
//! branch on ad hoc payload shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("request failed: {0}")]
    Failed(String),
    #[error("malformed response: success reported without data")]
    MissingData,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Collapse the envelope into a plain result. A `success: false`
    /// envelope or a successful one missing its payload both come back as
    /// errors, so nothing downstream sees a half-valid response.
    pub fn into_result(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Failed(
                self.message
                    .unwrap_or_else(|| "no reason provided".to_string()),
            ));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }
}
