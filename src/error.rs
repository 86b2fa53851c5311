use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// An inbound request that does not satisfy the request contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError(message.into())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The enrichment provider answered with a non-success status or could not be reached.
    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },

    /// The provider credential is missing.
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: String,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream_status: Option<u16>,
}

impl ApiError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Upstream { .. } => "UPSTREAM_ERROR",
            ApiError::Configuration(_) => "CONFIGURATION_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ApiError::Upstream { status, .. } => *status,
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Configuration(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            ApiError::Validation(_) => log::warn!("Rejected request: {}", self),
            _ => log::error!("{} ({}): {}", self.error_code(), status.as_u16(), self),
        }

        HttpResponse::build(status).json(ErrorBody {
            message: self.to_string(),
            error: self.error_code(),
            upstream_status: self.upstream_status(),
        })
    }
}
