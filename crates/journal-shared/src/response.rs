//! Error body returned by every failing endpoint: `{ "error": "...", "code": "..." }`.

use serde::{Deserialize, Serialize};

/// Stable, machine-readable error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    ValidationFailed,
    BadRequest,
    NotFound,
    PersistenceFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    pub code: ErrorCode,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }

    pub fn validation(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, error)
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, error)
    }

    pub fn persistence(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::PersistenceFailed, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let body = serde_json::to_value(ErrorResponse::validation("Title and content are required"))
            .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "error": "Title and content are required",
                "code": "validation_failed"
            })
        );
    }
}
