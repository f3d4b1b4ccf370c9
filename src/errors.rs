//! Typed failures surfaced by the data-access layer.
//!
//! Every fetch and write resolves to either its value or an [`ApiError`];
//! nothing below a screen panics on bad input from the network.

use serde::Serialize;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;

/// Coarse classification callers can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    Network,
    Api,
    MalformedResponse,
    Validation,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with `success: false` or a non-2xx status.
    #[error("{message}")]
    Api {
        message: String,
        error_code: Option<String>,
        status: Option<u16>,
    },

    /// The body did not have the envelope shape.
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),

    /// Input was rejected before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn api(message: impl Into<String>, error_code: Option<String>) -> Self {
        ApiError::Api {
            message: message.into(),
            error_code,
            status: None,
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        ApiError::MalformedResponse(reason.into())
    }

    /// Message suitable for a banner or toast.
    pub fn message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Api { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Network(_) => ApiErrorKind::Network,
            ApiError::Api { .. } => ApiErrorKind::Api,
            ApiError::MalformedResponse(_) => ApiErrorKind::MalformedResponse,
            ApiError::Validation(_) => ApiErrorKind::Validation,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<TypeConstraintError> for ApiError {
    fn from(val: TypeConstraintError) -> Self {
        ApiError::Validation(val.to_string())
    }
}

impl From<FormError> for ApiError {
    fn from(val: FormError) -> Self {
        ApiError::Validation(val.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(val: serde_json::Error) -> Self {
        ApiError::MalformedResponse(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_backend_message_verbatim() {
        let err = ApiError::api("Unit already occupied", Some("UNIT_OCCUPIED".into()));
        assert_eq!(err.to_string(), "Unit already occupied");
        assert_eq!(err.message(), "Unit already occupied");
        assert_eq!(err.error_code(), Some("UNIT_OCCUPIED"));
        assert_eq!(err.kind(), ApiErrorKind::Api);
    }

    #[test]
    fn constraint_errors_become_validation_errors() {
        let err: ApiError = TypeConstraintError::InvalidEmail.into();
        assert_eq!(err, ApiError::Validation("invalid email address".into()));
        assert_eq!(err.error_code(), None);
    }
}
