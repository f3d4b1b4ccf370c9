#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use property_dashboard::errors::{ApiError, ApiResult};
use property_dashboard::query::QueryCache;
use property_dashboard::repository::{
    ApiRepository, ApiRequest, ApiTransport, HttpMethod, RawResponse,
};
use property_dashboard::services::Dashboard;
use property_dashboard::session::Session;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

type Handler = Box<dyn Fn(&ApiRequest) -> Reply + Send + Sync>;

/// Scripted answer to one request.
pub struct Reply {
    result: ApiResult<RawResponse>,
    gate: Option<Arc<Semaphore>>,
}

impl Reply {
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            result: Ok(RawResponse::new(status, body)),
            gate: None,
        }
    }

    pub fn ok(data: Value) -> Self {
        Self::raw(
            200,
            json!({"success": true, "message": "", "data": data, "timestamp": "2026-01-01T00:00:00Z"})
                .to_string(),
        )
    }

    pub fn page(data: Value, page: usize, page_size: usize, total_count: usize) -> Self {
        let total_pages = total_count.div_ceil(page_size);
        Self::raw(
            200,
            json!({
                "success": true,
                "message": "",
                "data": data,
                "pagination": {
                    "page": page,
                    "page_size": page_size,
                    "total_count": total_count,
                    "total_pages": total_pages,
                    "has_next": page < total_pages,
                    "has_prev": page > 1
                },
                "timestamp": "2026-01-01T00:00:00Z"
            })
            .to_string(),
        )
    }

    pub fn fail(status: u16, message: &str, error_code: &str) -> Self {
        Self::raw(
            status,
            json!({"success": false, "message": message, "error_code": error_code, "timestamp": "t"})
                .to_string(),
        )
    }

    pub fn network(reason: &str) -> Self {
        Self {
            result: Err(ApiError::Network(reason.to_string())),
            gate: None,
        }
    }

    /// Holds the reply until a permit is added to `gate`.
    pub fn gated(mut self, gate: &Arc<Semaphore>) -> Self {
        self.gate = Some(gate.clone());
        self
    }
}

/// In-memory backend keyed by method and path.
#[derive(Default)]
pub struct FakeTransport {
    handlers: Mutex<Vec<(HttpMethod, String, Handler)>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on<F>(&self, method: HttpMethod, path: &str, handler: F)
    where
        F: Fn(&ApiRequest) -> Reply + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .push((method, path.to_string(), Box::new(handler)));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().clone()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

#[async_trait]
impl ApiTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        self.log.lock().push(request.clone());

        let reply = {
            let handlers = self.handlers.lock();
            handlers
                .iter()
                .find(|(method, path, _)| *method == request.method && *path == request.path)
                .map(|(_, _, handler)| handler(&request))
        };
        let Some(reply) = reply else {
            return Ok(RawResponse::new(
                404,
                json!({"success": false, "message": "Not found", "error_code": "NOT_FOUND"})
                    .to_string(),
            ));
        };

        if let Some(gate) = reply.gate {
            let _permit = gate.acquire().await.expect("gate closed");
        }
        reply.result
    }
}

pub fn dashboard(transport: &Arc<FakeTransport>) -> Dashboard {
    dashboard_with_stale_time(transport, Duration::from_secs(60))
}

pub fn dashboard_with_stale_time(
    transport: &Arc<FakeTransport>,
    stale_time: Duration,
) -> Dashboard {
    let repo = ApiRepository::new(transport.clone());
    Dashboard::new(
        repo,
        Arc::new(QueryCache::new(stale_time)),
        Arc::new(Session::with_token("test-token")),
    )
}

pub fn query_value<'a>(request: &'a ApiRequest, name: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// 25 staff records; ids 1-22 work in security.
pub fn staff_fixture() -> Value {
    let staff: Vec<Value> = (1..=25)
        .map(|id| {
            let (role, department) = match id {
                1..=22 => ("Guard", "Security"),
                23 => ("Security Liaison", "Facilities"),
                _ => ("Cleaner", "Housekeeping"),
            };
            json!({
                "id": id,
                "full_name": format!("Staff {id}"),
                "email": format!("staff{id}@example.com"),
                "phone": null,
                "role_name": role,
                "department": department,
                "status": if id % 5 == 0 { "on_leave" } else { "active" }
            })
        })
        .collect();
    Value::Array(staff)
}

pub fn unit(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "unit_number": format!("A-{id:03}"),
        "building": "Tower A",
        "floor": 1,
        "unit_type": "2bhk",
        "status": status
    })
}

pub fn notice(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Notice {id}"),
        "content": "Water supply interruption",
        "category": "maintenance",
        "priority": "high",
        "status": status
    })
}

pub fn service_request(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Leak {id}"),
        "description": "Kitchen sink",
        "category": "plumbing",
        "priority": "medium",
        "status": status,
        "unit_number": "A-001"
    })
}
