//! Translation of domain errors into HTTP responses
//!
//! User-actionable errors are returned with their own message.
//! Infrastructure failures are logged in full and answered with a generic
//! 500 body.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use std::fmt;

use vg_core::errors::{DomainError, ErrorKind, ValidationError};
use vg_shared::ErrorBody;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error type returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// Failure raised by the registration flow
    Domain(DomainError),
    /// Request body could not be parsed or failed shape checks
    BadRequest { message: String },
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::Domain(error)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "Invalid request data".to_string());
        ApiError::BadRequest { message }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Domain(error) => write!(f, "{}", error),
            ApiError::BadRequest { message } => write!(f, "{}", message),
        }
    }
}

/// HTTP status for each error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MissingField
        | ErrorKind::InvalidEmail
        | ErrorKind::InvalidOrExpired
        | ErrorKind::WrongCode => StatusCode::BAD_REQUEST,
        ErrorKind::DuplicateIdentity => StatusCode::CONFLICT,
        ErrorKind::AccountLocked => StatusCode::FORBIDDEN,
        ErrorKind::SpamLocked | ErrorKind::Cooldown | ErrorKind::TooManyAttempts => {
            StatusCode::TOO_MANY_REQUESTS
        }
        ErrorKind::NotificationFailure | ErrorKind::StoreUnavailable | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => status_for(error.kind()),
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ApiError::Domain(error) if error.is_infrastructure() => {
                tracing::error!(
                    kind = error.kind().code(),
                    error = %error,
                    event = "request_failed",
                    "Infrastructure failure while handling request"
                );
                ErrorBody::new(ErrorKind::Internal.code(), INTERNAL_MESSAGE)
            }
            ApiError::Domain(error) => {
                tracing::debug!(kind = error.kind().code(), error = %error, "Request rejected");
                domain_body(error)
            }
            ApiError::BadRequest { message } => ErrorBody::new("VALIDATION_ERROR", message.clone()),
        };

        HttpResponse::build(status).json(body)
    }
}

fn domain_body(error: &DomainError) -> ErrorBody {
    let body = ErrorBody::new(error.kind().code(), error.to_string());
    match error {
        DomainError::ValidationErr(ValidationError::MissingField { fields }) => {
            body.add_detail("fields", fields)
        }
        _ => match error.attempts_remaining() {
            Some(remaining) => body.add_detail("attempts_remaining", remaining),
            None => body,
        },
    }
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected malformed JSON body");
    ApiError::BadRequest {
        message: "Invalid JSON payload".to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use vg_core::errors::OtpError;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::MissingField), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::WrongCode), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::DuplicateIdentity), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorKind::AccountLocked), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::Cooldown), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            status_for(ErrorKind::StoreUnavailable),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_wrong_code_body_carries_remaining_attempts() {
        let error = ApiError::from(DomainError::from(OtpError::WrongCode {
            attempts_remaining: 1,
        }));
        let (status, json) = body_json(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "WRONG_CODE");
        assert_eq!(json["message"], "Incorrect OTP. 1 attempts left.");
        assert_eq!(json["details"]["attempts_remaining"], 1);
    }

    #[actix_web::test]
    async fn test_infrastructure_detail_is_hidden() {
        let error = ApiError::from(DomainError::StoreUnavailable {
            message: "redis://10.0.0.5 connection refused".to_string(),
        });
        let (status, json) = body_json(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Internal server error");
        assert!(!json.to_string().contains("10.0.0.5"));
    }

    #[actix_web::test]
    async fn test_missing_field_lists_fields() {
        let error = ApiError::from(DomainError::from(ValidationError::MissingField {
            fields: vec!["country".to_string()],
        }));
        let (_, json) = body_json(error).await;

        assert_eq!(json["message"], "Missing required fields!");
        assert_eq!(json["details"]["fields"][0], "country");
    }
}
