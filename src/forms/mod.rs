//! Form definitions backing the dashboard write operations.
//!
//! Each form is what a screen collects from the user; `TryFrom` turns it into
//! the typed payload sent to the backend, so invalid input never leaves the
//! client.

use thiserror::Error;
use validator::ValidationErrors;

pub mod amenities;
pub mod documents;
pub mod notices;
pub mod onboarding;
pub mod parking;
pub mod service_requests;
pub mod staff;
pub mod units;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid id")]
    InvalidId,

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid vehicle number")]
    InvalidVehicleNumber,

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("remarks are required when rejecting")]
    MissingRemarks,
}

/// Trims an optional text input, mapping blank values to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
