//! Access to the property-management REST backend.
//!
//! [`ApiTransport`] is the only seam that touches the network; everything
//! above it works with [`ApiRequest`] values and unwrapped [`Payload`]s.

use std::sync::Arc;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use serde::Serialize;
use serde_json::Value;

use crate::dto::envelope::{Payload, parse_response};
use crate::dto::list::ListParams;
use crate::errors::{ApiError, ApiResult};

pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Page size used when walking a whole collection.
pub const DEFAULT_FETCH_ALL_PAGE_SIZE: usize = 100;
/// Upper bound on pages walked for one collection.
pub const DEFAULT_MAX_FETCH_PAGES: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// One call against the backend, relative to the API base url.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Body-less POST, used for state transitions such as publish.
    pub fn action(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> ApiResult<Self> {
        Self::new(HttpMethod::Post, path).json(body)
    }

    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> ApiResult<Self> {
        Self::new(HttpMethod::Put, path).json(body)
    }

    pub fn patch<B: Serialize>(path: impl Into<String>, body: &B) -> ApiResult<Self> {
        Self::new(HttpMethod::Patch, path).json(body)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    fn json<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Validation(format!("payload is not serializable: {e}")))?;
        self.body = Some(body);
        Ok(self)
    }
}

/// Status and body exactly as received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends one request. Only failures to get any response are errors here.
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse>;
}

/// Envelope-aware client over a transport.
#[derive(Clone)]
pub struct ApiRepository {
    transport: Arc<dyn ApiTransport>,
    retry: usize,
    fetch_all_page_size: usize,
    max_fetch_pages: usize,
}

impl ApiRepository {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            transport,
            retry: 0,
            fetch_all_page_size: DEFAULT_FETCH_ALL_PAGE_SIZE,
            max_fetch_pages: DEFAULT_MAX_FETCH_PAGES,
        }
    }

    /// Opt-in retry count for reads that fail at the network level.
    pub fn with_retry(mut self, retry: usize) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_fetch_limits(mut self, page_size: usize, max_pages: usize) -> Self {
        self.fetch_all_page_size = page_size.max(1);
        self.max_fetch_pages = max_pages.max(1);
        self
    }

    /// Sends a request once and unwraps the envelope.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<Payload> {
        let method = request.method;
        let path = request.path.clone();
        let raw = self.transport.send(request).await?;
        log::debug!("{method:?} {path} -> {}", raw.status);
        parse_response(raw.status, &raw.body)
    }

    /// Read path: like [`Self::execute`] plus the configured network retries.
    pub async fn query(&self, request: ApiRequest) -> ApiResult<Payload> {
        if self.retry == 0 {
            return self.execute(request).await;
        }

        (|| async { self.execute(request.clone()).await })
            .retry(ExponentialBuilder::default().with_max_times(self.retry))
            .when(ApiError::is_network)
            .notify(|err, dur| {
                log::warn!(
                    "Request to {} failed, retrying after {:.2}s: {err}",
                    request.path,
                    dur.as_secs_f64()
                )
            })
            .await
    }

    /// Walks server pages until the backend reports no further page.
    pub async fn fetch_all(&self, path: &str, params: &ListParams) -> ApiResult<Payload> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let request = ApiRequest::get(path).with_query(
                params
                    .clone()
                    .paginate(page, self.fetch_all_page_size)
                    .to_query(),
            );
            let payload = self.query(request).await?;

            let batch = match payload.data {
                Value::Array(batch) => batch,
                other if page == 1 => {
                    return Ok(Payload {
                        data: other,
                        ..payload
                    });
                }
                other => {
                    log::warn!("Page {page} of {path} is not a list ({other}), stopping");
                    break;
                }
            };
            items.extend(batch);

            let more = payload
                .pagination
                .as_ref()
                .is_some_and(|meta| meta.has_next || page < meta.total_pages);
            if !more {
                break;
            }
            if page >= self.max_fetch_pages {
                log::warn!(
                    "Stopped walking {path} after {page} pages; {} items collected",
                    items.len()
                );
                break;
            }
            page += 1;
        }

        Ok(Payload {
            data: Value::Array(items),
            pagination: None,
            message: String::new(),
            timestamp: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::mock::MockTransport;
    use super::*;

    fn ok_body(data: Value) -> RawResponse {
        RawResponse::new(
            200,
            json!({"success": true, "message": "", "data": data, "timestamp": "t"}).to_string(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn reads_retry_network_failures_when_enabled() {
        let mut transport = MockTransport::new();
        let mut calls = 0;
        transport.expect_send().times(3).returning(move |_| {
            calls += 1;
            if calls < 3 {
                Err(ApiError::Network("connection reset".into()))
            } else {
                Ok(ok_body(json!([1])))
            }
        });

        let repo = ApiRepository::new(Arc::new(transport)).with_retry(2);
        let payload = repo.query(ApiRequest::get("/amenities")).await.unwrap();
        assert_eq!(payload.data, json!([1]));
    }

    #[tokio::test]
    async fn writes_are_sent_once() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.method == HttpMethod::Post && request.body.is_some())
            .times(1)
            .returning(|_| Err(ApiError::Network("connection reset".into())));

        let repo = ApiRepository::new(Arc::new(transport)).with_retry(3);
        let request = ApiRequest::post("/notices", &json!({"title": "Lift service"})).unwrap();
        assert!(repo.execute(request).await.unwrap_err().is_network());
    }

    #[tokio::test]
    async fn backend_errors_are_not_retried() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(RawResponse::new(
                422,
                json!({"success": false, "message": "Invalid slot", "error_code": "VALIDATION"})
                    .to_string(),
            ))
        });

        let repo = ApiRepository::new(Arc::new(transport)).with_retry(3);
        let err = repo.query(ApiRequest::get("/parking-slots")).await.unwrap_err();
        assert_eq!(err.error_code(), Some("VALIDATION"));
    }

    #[tokio::test]
    async fn fetch_all_stops_at_the_page_limit() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(2).returning(|request| {
            let page = request
                .query
                .iter()
                .find(|(k, _)| k == "page")
                .map(|(_, v)| v.clone())
                .unwrap();
            Ok(RawResponse::new(
                200,
                json!({
                    "success": true,
                    "data": [page],
                    "pagination": {"page": 1, "page_size": 1, "total_count": 50, "total_pages": 50, "has_next": true},
                    "message": "",
                    "timestamp": "t"
                })
                .to_string(),
            ))
        });

        let repo = ApiRepository::new(Arc::new(transport)).with_fetch_limits(1, 2);
        let payload = repo.fetch_all("/residents", &ListParams::new()).await.unwrap();
        assert_eq!(payload.data, json!(["1", "2"]));
        assert_eq!(payload.pagination, None);
    }
}
