//! API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Plain success envelope: `{"success": true, "message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Error envelope: `{"status": "error", "error": "...", "message": "...", "details": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `"error"`
    pub status: String,

    /// Stable machine-readable error code
    pub error: String,

    /// Human-readable message, safe to show to the end user
    pub message: String,

    /// Additional error details (remaining attempts, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail field to the error body
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub store: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_serialization() {
        let body = ErrorBody::new("WRONG_CODE", "Incorrect OTP. 2 attempts left.")
            .add_detail("attempts_remaining", 2);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "WRONG_CODE");
        assert_eq!(json["details"]["attempts_remaining"], 2);
    }

    #[test]
    fn test_error_body_omits_empty_details() {
        let json = serde_json::to_string(&ErrorBody::new("X", "y")).unwrap();
        assert!(!json.contains("details"));
    }
}
