use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use crate::core::MatchError;
use crate::models::{ErrorResponse, FilterParseError};
use crate::routes::auth::AuthError;
use crate::services::StoreError;

/// JSON error returned by every handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.into(),
                message: message.into(),
                status_code: status.as_u16(),
            },
        }
    }

    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, message)
    }

    pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error, message)
    }

    pub fn forbidden(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, error, message)
    }

    /// Map a store miss to a 404 carrying `error`, passing other failures through
    pub fn from_store_miss(err: StoreError, error: &str) -> Self {
        match err {
            StoreError::NotFound(message) => Self::not_found(error, message),
            other => other.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.body.error, self.body.message)
    }
}

impl std::error::Error for ApiError {}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(message) => Self::not_found("Not found", message),
            StoreError::Conflict(message) => Self::bad_request(message.clone(), message),
            StoreError::Seed(message) => {
                tracing::error!("Store error: {}", message);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", message)
            }
        }
    }
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::NotFound(_) => Self::not_found("User not found", err.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::bad_request("Validation failed", errors.to_string())
    }
}

impl From<FilterParseError> for ApiError {
    fn from(err: FilterParseError) -> Self {
        Self::bad_request("Invalid filter", err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", err.to_string())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::bad_request("invalid_json", format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request("invalid_query", format!("Invalid query: {}", err)).into()
}
