//! The success/error wrapper every backend endpoint answers with.
//!
//! Some endpoints put the collection straight into `data`, others wrap it a
//! second time as `{"data": {"data": [...], ...}}`. [`unwrap_envelope`]
//! accepts both so callers only ever see the inner value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ApiError, ApiResult};

/// Keys that may sit next to a nested `data` without making it a record.
const WRAPPER_KEYS: &[&str] = &[
    "data",
    "pagination",
    "page",
    "page_size",
    "total_count",
    "total_pages",
    "has_next",
    "has_prev",
    "total",
    "count",
];

const PAGINATION_KEYS: &[&str] = &[
    "page",
    "page_size",
    "total_count",
    "total_pages",
    "has_next",
    "has_prev",
    "total",
];

/// Server-side pagination metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationMeta {
    pub page: usize,
    pub page_size: usize,
    #[serde(alias = "total")]
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Wire shape of an envelope, used when building bodies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default)]
    pub timestamp: String,
}

impl<T> ResponseEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            data: Some(data),
            pagination: None,
            error_code: None,
            timestamp: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>, error_code: Option<&str>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            pagination: None,
            error_code: error_code.map(str::to_string),
            timestamp: String::new(),
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationMeta) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Unwrapped body of a successful response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub data: Value,
    pub pagination: Option<PaginationMeta>,
    pub message: String,
    pub timestamp: Option<String>,
}

/// Turns a parsed body into its inner value or a typed failure.
pub fn unwrap_envelope(body: Value) -> ApiResult<Payload> {
    let Value::Object(mut map) = body else {
        return Err(ApiError::malformed("body is not a JSON object"));
    };

    let success = match map.get("success") {
        Some(Value::Bool(success)) => *success,
        Some(_) => return Err(ApiError::malformed("`success` is not a boolean")),
        None => return Err(ApiError::malformed("missing `success` flag")),
    };

    let message = match map.remove("message") {
        Some(Value::String(message)) => message,
        _ => String::new(),
    };
    let timestamp = match map.remove("timestamp") {
        Some(Value::String(timestamp)) => Some(timestamp),
        _ => None,
    };

    if !success {
        let error_code = match map.remove("error_code") {
            Some(Value::String(code)) => Some(code),
            Some(Value::Number(code)) => Some(code.to_string()),
            _ => None,
        };
        let message = if message.is_empty() {
            "request failed".to_string()
        } else {
            message
        };
        return Err(ApiError::Api {
            message,
            error_code,
            status: None,
        });
    }

    let outer_pagination = map.remove("pagination").and_then(pagination_from);
    let data = map.remove("data").unwrap_or(Value::Null);
    let (data, inner_pagination) = unwrap_nested(data);

    Ok(Payload {
        data,
        pagination: outer_pagination.or(inner_pagination),
        message,
        timestamp,
    })
}

/// Parses a raw HTTP body and attaches the status to any failure.
pub fn parse_response(status: u16, body: &str) -> ApiResult<Payload> {
    let is_success = (200..300).contains(&status);

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) if is_success => {
            return Err(ApiError::malformed(format!("invalid JSON body: {err}")));
        }
        Err(_) => {
            return Err(ApiError::Api {
                message: format!("request failed with status {status}"),
                error_code: None,
                status: Some(status),
            });
        }
    };

    match unwrap_envelope(value) {
        Err(ApiError::Api {
            message,
            error_code,
            ..
        }) => Err(ApiError::Api {
            message,
            error_code,
            status: Some(status),
        }),
        Err(ApiError::MalformedResponse(_)) if !is_success => Err(ApiError::Api {
            message: format!("request failed with status {status}"),
            error_code: None,
            status: Some(status),
        }),
        other => other,
    }
}

fn unwrap_nested(data: Value) -> (Value, Option<PaginationMeta>) {
    match data {
        Value::Object(inner) if is_wrapper(&inner) => {
            let mut inner = inner;
            let nested = inner.remove("data").unwrap_or(Value::Null);
            let pagination = match inner.remove("pagination") {
                Some(meta) => pagination_from(meta),
                None if inner.keys().any(|k| PAGINATION_KEYS.contains(&k.as_str())) => {
                    pagination_from(Value::Object(inner))
                }
                None => None,
            };
            (nested, pagination)
        }
        other => (other, None),
    }
}

fn is_wrapper(map: &Map<String, Value>) -> bool {
    map.contains_key("data") && map.keys().all(|k| WRAPPER_KEYS.contains(&k.as_str()))
}

fn pagination_from(value: Value) -> Option<PaginationMeta> {
    match serde_json::from_value(value) {
        Ok(meta) => Some(meta),
        Err(err) => {
            log::warn!("Ignoring unreadable pagination metadata: {err}");
            None
        }
    }
}
