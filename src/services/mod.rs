//! Dashboard facade: cached reads, tracked writes and automatic invalidation.
//!
//! Screens talk to [`Dashboard`] through the per-resource functions in the
//! submodules. Reads go through the shared [`QueryCache`]; every write runs
//! under its [`MutationHook`] and, on success, invalidates whatever the
//! [`InvalidationRegistry`] lists for it.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::dto::envelope::Payload;
use crate::dto::list::{ListMode, ListParams};
use crate::errors::ApiResult;
use crate::models::config::DashboardConfig;
use crate::pagination::{ListItem, ListQueryState, Page, paginate};
use crate::query::{
    InvalidationRegistry, KeyPattern, MutationHook, MutationKind, QueryCache, QueryKey, QueryState,
};
use crate::repository::http::ReqwestTransport;
use crate::repository::{ApiRepository, ApiRequest};
use crate::session::Session;

pub mod amenities;
pub mod documents;
pub mod notices;
pub mod onboarding;
pub mod parking;
pub mod residents;
pub mod service_requests;
pub mod staff;
pub mod units;

/// A backend collection the dashboard can list.
pub trait Resource: ListItem + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Cache key prefix.
    const KEY: &'static str;
    /// Collection endpoint, relative to the API base url.
    const PATH: &'static str;
    /// Layer that paginates this collection.
    const MODE: ListMode = ListMode::Client;

    fn item_path(id: i64) -> String {
        format!("{}/{id}", Self::PATH)
    }
}

#[derive(Clone)]
pub struct Dashboard {
    repo: ApiRepository,
    cache: Arc<QueryCache>,
    invalidations: Arc<InvalidationRegistry>,
    mutations: Arc<Mutex<HashMap<MutationKind, MutationHook>>>,
    session: Arc<Session>,
}

impl Dashboard {
    pub fn new(repo: ApiRepository, cache: Arc<QueryCache>, session: Arc<Session>) -> Self {
        Self {
            repo,
            cache,
            invalidations: Arc::new(InvalidationRegistry::default()),
            mutations: Arc::new(Mutex::new(HashMap::new())),
            session,
        }
    }

    /// Restores the session and wires the HTTP transport from configuration.
    pub fn from_config(config: &DashboardConfig) -> io::Result<Self> {
        let session = match &config.token_path {
            Some(path) => Session::restore(path)?,
            None => Session::anonymous(),
        };
        let session = Arc::new(session);

        let transport = ReqwestTransport::new(
            &config.api_base_url,
            config.request_timeout(),
            session.clone(),
        )
        .map_err(|e| io::Error::other(format!("Failed to build HTTP client: {e}")))?;

        let repo = ApiRepository::new(Arc::new(transport))
            .with_retry(config.retry)
            .with_fetch_limits(config.fetch_all_page_size, config.max_fetch_pages);

        Ok(Self::new(
            repo,
            Arc::new(QueryCache::new(config.stale_time())),
            session,
        ))
    }

    pub fn with_invalidations(mut self, registry: InvalidationRegistry) -> Self {
        self.invalidations = Arc::new(registry);
        self
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Every record of `R` matching `params`, walking all server pages.
    pub async fn query_collection<R: Resource>(&self, params: ListParams) -> QueryState<Vec<R>> {
        let key = QueryKey::list(R::KEY, &params);
        let repo = self.repo.clone();
        let fetcher = move || {
            let repo = repo.clone();
            let params = params.clone();
            async move { repo.fetch_all(R::PATH, &params).await }
        };
        self.cache
            .fetch(&key, fetcher)
            .await
            .and_then(|payload| decode_items::<R>(&payload))
    }

    /// The page a list screen shows for `state`, paginated by exactly one layer.
    pub async fn query_list<R: Resource>(&self, state: &ListQueryState) -> QueryState<Page<R>> {
        self.list(state, false).await
    }

    /// Like [`Self::query_list`] but always goes to the network.
    pub async fn refetch_list<R: Resource>(&self, state: &ListQueryState) -> QueryState<Page<R>> {
        self.list(state, true).await
    }

    async fn list<R: Resource>(&self, state: &ListQueryState, force: bool) -> QueryState<Page<R>> {
        match R::MODE {
            ListMode::Client => {
                let params = ListParams::new();
                let key = QueryKey::list(R::KEY, &params);
                let repo = self.repo.clone();
                let fetcher = move || {
                    let repo = repo.clone();
                    let params = params.clone();
                    async move { repo.fetch_all(R::PATH, &params).await }
                };
                let fetched = if force {
                    self.cache.refetch(&key, fetcher).await
                } else {
                    self.cache.fetch(&key, fetcher).await
                };
                fetched
                    .and_then(|payload| decode_items::<R>(&payload))
                    .map(|items| paginate(&items, state).cloned())
            }
            ListMode::Server => {
                let params = ListParams::from_state(state);
                let key = QueryKey::list(R::KEY, &params);
                let request = ApiRequest::get(R::PATH).with_query(params.to_query());
                let repo = self.repo.clone();
                let fetcher = move || {
                    let repo = repo.clone();
                    let request = request.clone();
                    async move { repo.query(request).await }
                };
                let fetched = if force {
                    self.cache.refetch(&key, fetcher).await
                } else {
                    self.cache.fetch(&key, fetcher).await
                };
                fetched.and_then(|payload| server_page::<R>(&payload, state))
            }
        }
    }

    /// A single record by id.
    pub async fn query_item<R: Resource>(&self, id: i64) -> QueryState<R> {
        let key = QueryKey::item(R::KEY, id);
        let request = ApiRequest::get(R::item_path(id));
        let repo = self.repo.clone();
        let fetcher = move || {
            let repo = repo.clone();
            let request = request.clone();
            async move { repo.query(request).await }
        };
        self.cache
            .fetch(&key, fetcher)
            .await
            .and_then(|payload| Ok(R::deserialize(&payload.data)?))
    }

    fn hook(&self, kind: MutationKind) -> MutationHook {
        self.mutations.lock().entry(kind).or_default().clone()
    }

    /// Sends one write and, when it succeeds, invalidates the queries it affects.
    pub async fn mutate(&self, kind: MutationKind, request: ApiRequest) -> ApiResult<Payload> {
        let payload = self.hook(kind).run(self.repo.execute(request)).await;
        match &payload {
            Ok(_) => {
                self.invalidations.apply(kind, &self.cache);
            }
            Err(err) => log::error!("{kind:?} failed: {err}"),
        }
        payload
    }

    /// [`Self::mutate`] plus decoding of the returned record. A write the
    /// backend acknowledges without a record is still a success.
    pub async fn mutate_with<T: DeserializeOwned>(
        &self,
        kind: MutationKind,
        request: ApiRequest,
    ) -> ApiResult<Option<T>> {
        let payload = self.mutate(kind, request).await?;
        if payload.data.is_null() {
            log::debug!("{kind:?} succeeded without a record: {}", payload.message);
            return Ok(None);
        }
        Ok(Some(T::deserialize(&payload.data)?))
    }

    pub fn is_pending(&self, kind: MutationKind) -> bool {
        self.mutations
            .lock()
            .get(&kind)
            .is_some_and(MutationHook::is_pending)
    }

    pub fn invalidate(&self, pattern: &KeyPattern) -> usize {
        self.cache.invalidate(pattern)
    }

    /// Stores a new token. Cached data fetched anonymously is dropped.
    pub fn login(&self, token: impl Into<String>) -> io::Result<()> {
        self.session.login(token)?;
        self.cache.clear();
        Ok(())
    }

    /// Forgets the session and everything cached under it.
    pub fn logout(&self) -> io::Result<()> {
        self.cache.clear();
        self.session.logout()
    }
}

/// Decodes a list payload. Anything but an array is an empty list.
fn decode_items<R: DeserializeOwned>(payload: &Payload) -> ApiResult<Vec<R>> {
    match &payload.data {
        Value::Array(_) => Ok(Vec::<R>::deserialize(&payload.data)?),
        other => {
            log::warn!("Expected a list, got {}; treating it as empty", kind_of(other));
            Ok(Vec::new())
        }
    }
}

fn server_page<R: Resource>(payload: &Payload, state: &ListQueryState) -> ApiResult<Page<R>> {
    let items = decode_items::<R>(payload)?;
    match &payload.pagination {
        Some(meta) => Ok(Page::from_server(items, meta, state)),
        None => {
            log::warn!(
                "{} answered without pagination metadata; paginating locally",
                R::PATH
            );
            Ok(paginate(&items, state).cloned())
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
