use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use property_dashboard::domain::unit::Unit;
use property_dashboard::dto::envelope::Payload;
use property_dashboard::errors::ApiError;
use property_dashboard::pagination::ListQueryState;
use property_dashboard::query::{KeyPattern, QueryCache, QueryKey, keys};
use property_dashboard::repository::HttpMethod;
use property_dashboard::services::units;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

mod common;

use common::{FakeTransport, Reply};

fn payload(value: Value) -> Payload {
    Payload {
        data: value,
        pagination: None,
        message: String::new(),
        timestamp: None,
    }
}

#[tokio::test]
async fn test_concurrent_reads_share_one_request() {
    let transport = FakeTransport::new();
    let gate = Arc::new(Semaphore::new(0));
    {
        let gate = gate.clone();
        transport.on(HttpMethod::Get, "/units", move |_| {
            Reply::ok(json!([common::unit(1, "vacant")])).gated(&gate)
        });
    }
    // Zero stale time: only in-flight sharing can avoid the second request.
    let dashboard = common::dashboard_with_stale_time(&transport, Duration::ZERO);
    let state = ListQueryState::default();

    let first = units::list_units(&dashboard, &state);
    let second = units::list_units(&dashboard, &state);
    tokio::pin!(first, second);

    assert!(futures::poll!(&mut first).is_pending());
    assert!(futures::poll!(&mut second).is_pending());
    assert!(dashboard.cache().peek(&QueryKey::list(keys::UNITS, &Default::default())).is_loading);

    gate.add_permits(10);
    let (first, second) = (first.await, second.await);

    assert_eq!(transport.count(HttpMethod::Get, "/units"), 1);
    assert_eq!(first.data, second.data);
    assert_eq!(first.data.unwrap().items.len(), 1);
}

#[tokio::test]
async fn test_fresh_data_is_served_from_cache_until_invalidated() {
    let transport = FakeTransport::new();
    transport.on(HttpMethod::Get, "/units", |_| {
        Reply::ok(json!([common::unit(1, "vacant"), common::unit(2, "occupied")]))
    });
    let dashboard = common::dashboard(&transport);
    let mut state = ListQueryState::default();

    units::list_units(&dashboard, &state).await;
    state.set_filter("status", "vacant");
    let filtered = units::list_units(&dashboard, &state).await;

    // Client-paginated lists cache the whole collection once.
    assert_eq!(transport.count(HttpMethod::Get, "/units"), 1);
    assert_eq!(filtered.data.unwrap().total_items, 1);

    assert_eq!(dashboard.invalidate(&KeyPattern::resource(keys::UNITS)), 1);
    units::list_units(&dashboard, &state).await;
    assert_eq!(transport.count(HttpMethod::Get, "/units"), 2);
}

#[tokio::test]
async fn test_superseded_response_is_discarded() {
    let cache = QueryCache::new(Duration::from_secs(60));
    let key = QueryKey::new(keys::NOTICES);
    let gate = Arc::new(Semaphore::new(0));

    let slow = {
        let gate = gate.clone();
        move || {
            let gate = gate.clone();
            async move {
                let _permit = gate.acquire().await.expect("gate closed");
                Ok(payload(json!("old")))
            }
        }
    };
    let older = cache.fetch(&key, slow);
    tokio::pin!(older);
    assert!(futures::poll!(&mut older).is_pending());

    let newer = cache
        .refetch(&key, || async { Ok(payload(json!("new"))) })
        .await;
    assert_eq!(newer.data.unwrap().data, json!("new"));

    gate.add_permits(1);
    let older = older.await;

    assert_eq!(older.data.unwrap().data, json!("new"));
    assert_eq!(cache.peek(&key).data.unwrap().data, json!("new"));
}

#[tokio::test]
async fn test_invalidation_during_flight_refetches() {
    let cache = QueryCache::new(Duration::from_secs(60));
    let key = QueryKey::new(keys::STAFF);
    let gate = Arc::new(Semaphore::new(0));
    let calls = Arc::new(AtomicUsize::new(0));

    let fetcher = {
        let gate = gate.clone();
        let calls = calls.clone();
        move || {
            let gate = gate.clone();
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    let _permit = gate.acquire().await.expect("gate closed");
                    Ok(payload(json!("before write")))
                } else {
                    Ok(payload(json!("after write")))
                }
            }
        }
    };

    let read = cache.fetch(&key, fetcher);
    tokio::pin!(read);
    assert!(futures::poll!(&mut read).is_pending());

    cache.invalidate(&KeyPattern::resource(keys::STAFF));
    gate.add_permits(1);
    let state = read.await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(state.data.unwrap().data, json!("after write"));
    assert!(!state.is_stale);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_data() {
    let cache = QueryCache::new(Duration::from_secs(60));
    let key = QueryKey::new(keys::AMENITIES);

    cache
        .fetch(&key, || async { Ok(payload(json!([1]))) })
        .await;
    cache.invalidate(&KeyPattern::Exact(key.clone()));

    let state = cache
        .fetch(&key, || async { Err(ApiError::Network("offline".into())) })
        .await;

    assert_eq!(state.data.unwrap().data, json!([1]));
    assert_eq!(state.error, None);
    assert_eq!(state.last_error, Some(ApiError::Network("offline".into())));
    assert!(state.is_stale);
}

#[tokio::test]
async fn test_removed_key_resolves_idle() {
    let cache = QueryCache::default();
    let key = QueryKey::new(keys::PARKING);
    let gate = Arc::new(Semaphore::new(0));

    let fetcher = {
        let gate = gate.clone();
        move || {
            let gate = gate.clone();
            async move {
                let _permit = gate.acquire().await.expect("gate closed");
                Ok(payload(json!([])))
            }
        }
    };
    let read = cache.fetch(&key, fetcher);
    tokio::pin!(read);
    assert!(futures::poll!(&mut read).is_pending());

    assert!(cache.remove(&key));
    gate.add_permits(1);
    let state = read.await;

    assert!(state.data.is_none());
    assert!(!state.is_loading);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_non_array_list_data_is_an_empty_list() {
    let transport = FakeTransport::new();
    transport.on(HttpMethod::Get, "/units", |_| Reply::ok(json!({"unexpected": true})));
    let dashboard = common::dashboard(&transport);

    let state = units::list_units(&dashboard, &ListQueryState::default()).await;
    let page = state.data.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_item_query_decodes_record() {
    let transport = FakeTransport::new();
    transport.on(HttpMethod::Get, "/units/4", |_| Reply::ok(common::unit(4, "reserved")));
    let dashboard = common::dashboard(&transport);

    let state = dashboard.query_item::<Unit>(4).await;
    assert_eq!(state.data.unwrap().unit_number, "A-004");
}
