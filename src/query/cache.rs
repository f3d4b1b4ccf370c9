//! Process-wide query cache.
//!
//! One entry per [`QueryKey`]. Concurrent reads of a key share a single
//! in-flight request, and every request carries a generation number so a
//! response that was overtaken by a newer request or an invalidation is
//! never written into the entry.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use crate::dto::envelope::Payload;
use crate::errors::{ApiError, ApiResult};
use crate::query::key::{KeyPattern, QueryKey};

pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(30);

type SharedFetch = Shared<BoxFuture<'static, ApiResult<Arc<Payload>>>>;

/// What a screen renders for one query.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    /// Set only when the last attempt failed and nothing was ever loaded.
    pub error: Option<ApiError>,
    /// Failure of the most recent attempt, even when older data is shown.
    pub last_error: Option<ApiError>,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub is_stale: bool,
}

impl<T> QueryState<T> {
    /// Nothing loaded and nothing in flight.
    pub fn idle() -> Self {
        Self {
            data: None,
            error: None,
            last_error: None,
            is_loading: false,
            is_fetching: false,
            is_stale: true,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        QueryState {
            data: self.data.map(f),
            error: self.error,
            last_error: self.last_error,
            is_loading: self.is_loading,
            is_fetching: self.is_fetching,
            is_stale: self.is_stale,
        }
    }

    /// Like [`Self::map`] for conversions that can fail. A failed
    /// conversion drops the data and becomes the visible error.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> ApiResult<U>) -> QueryState<U> {
        let (data, error) = match self.data.map(f) {
            Some(Ok(data)) => (Some(data), self.error),
            Some(Err(err)) => (None, Some(err)),
            None => (None, self.error),
        };
        QueryState {
            data,
            last_error: self.last_error.or_else(|| error.clone()),
            error,
            is_loading: self.is_loading,
            is_fetching: self.is_fetching,
            is_stale: self.is_stale,
        }
    }

    pub fn into_result(self) -> ApiResult<Option<T>> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(Some(data)),
            (None, Some(err)) => Err(err),
            (None, None) => Ok(None),
        }
    }
}

#[derive(Default)]
struct CacheEntry {
    data: Option<Arc<Payload>>,
    updated_at: Option<Instant>,
    last_error: Option<ApiError>,
    invalidated: bool,
    /// Generation of the most recently issued request.
    generation: u64,
    /// Generation whose result is currently stored.
    applied: u64,
    in_flight: Option<(u64, SharedFetch)>,
}

impl CacheEntry {
    fn is_fresh(&self, stale_time: Duration) -> bool {
        !self.invalidated
            && self.data.is_some()
            && self
                .updated_at
                .is_some_and(|at| at.elapsed() < stale_time)
    }

    fn state(&self, stale_time: Duration) -> QueryState<Arc<Payload>> {
        let is_fetching = self.in_flight.is_some();
        QueryState {
            data: self.data.clone(),
            error: if self.data.is_none() {
                self.last_error.clone()
            } else {
                None
            },
            last_error: self.last_error.clone(),
            is_loading: self.data.is_none() && is_fetching,
            is_fetching,
            is_stale: !self.is_fresh(stale_time),
        }
    }

    fn start<F, Fut>(&mut self, fetcher: &F) -> (u64, SharedFetch)
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ApiResult<Payload>> + Send + 'static,
    {
        self.generation += 1;
        let shared = fetcher().map(|result| result.map(Arc::new)).boxed().shared();
        self.in_flight = Some((self.generation, shared.clone()));
        (self.generation, shared)
    }
}

enum Step {
    Ready(QueryState<Arc<Payload>>),
    Wait(u64, SharedFetch),
}

/// One caller awaiting a shared request.
///
/// When the last caller is dropped before the request resolves, the entry
/// stops reporting it as in flight and the request itself is dropped.
struct Waiter<'c> {
    cache: &'c QueryCache,
    key: &'c QueryKey,
    generation: u64,
    shared: SharedFetch,
    done: bool,
}

impl Waiter<'_> {
    async fn wait(&mut self) -> ApiResult<Arc<Payload>> {
        let result = (&mut self.shared).await;
        self.done = true;
        result
    }
}

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut entries = self.cache.entries.lock();
        let Some(entry) = entries.get_mut(self.key) else {
            return;
        };
        // The entry and this waiter hold the only handles left.
        let abandoned = matches!(
            &entry.in_flight,
            Some((generation, shared))
                if *generation == self.generation
                    && shared.strong_count().is_none_or(|count| count <= 2)
        );
        if abandoned {
            log::debug!("No callers left for {}, dropping request", self.key);
            entry.in_flight = None;
        }
    }
}

pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    stale_time: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME)
    }
}

impl QueryCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stale_time,
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Serves fresh data without I/O, joins a request already in flight,
    /// or issues a new one.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> QueryState<Arc<Payload>>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = ApiResult<Payload>> + Send + 'static,
    {
        let step = self.begin(key, &fetcher, false);
        self.drive(key, &fetcher, step).await
    }

    /// Always issues a new request; any older request for the key is
    /// superseded and its result discarded.
    pub async fn refetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> QueryState<Arc<Payload>>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = ApiResult<Payload>> + Send + 'static,
    {
        let step = self.begin(key, &fetcher, true);
        self.drive(key, &fetcher, step).await
    }

    async fn drive<F, Fut>(
        &self,
        key: &QueryKey,
        fetcher: &F,
        mut step: Step,
    ) -> QueryState<Arc<Payload>>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = ApiResult<Payload>> + Send + 'static,
    {
        loop {
            match step {
                Step::Ready(state) => return state,
                Step::Wait(generation, shared) => {
                    let mut waiter = Waiter {
                        cache: self,
                        key,
                        generation,
                        shared,
                        done: false,
                    };
                    let result = waiter.wait().await;
                    step = self.settle(key, generation, result, fetcher);
                }
            }
        }
    }

    fn begin<F, Fut>(&self, key: &QueryKey, fetcher: &F, force: bool) -> Step
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ApiResult<Payload>> + Send + 'static,
    {
        let mut entries = self.entries.lock();
        let entry = entries.entry(key.clone()).or_default();

        if !force {
            if entry.is_fresh(self.stale_time) {
                log::debug!("Cache hit for {key}");
                return Step::Ready(entry.state(self.stale_time));
            }
            if let Some((generation, shared)) = &entry.in_flight {
                log::debug!("Joining in-flight request for {key}");
                return Step::Wait(*generation, shared.clone());
            }
        }

        log::debug!("Fetching {key}");
        let (generation, shared) = entry.start(fetcher);
        Step::Wait(generation, shared)
    }

    fn settle<F, Fut>(
        &self,
        key: &QueryKey,
        generation: u64,
        result: ApiResult<Arc<Payload>>,
        fetcher: &F,
    ) -> Step
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ApiResult<Payload>> + Send + 'static,
    {
        let mut entries = self.entries.lock();
        let Some(entry) = entries.get_mut(key) else {
            log::debug!("Dropping response for removed key {key}");
            return Step::Ready(QueryState::idle());
        };

        if generation == entry.generation {
            if entry.applied < generation {
                entry.applied = generation;
                entry.in_flight = None;
                match result {
                    Ok(data) => {
                        entry.data = Some(data);
                        entry.updated_at = Some(Instant::now());
                        entry.last_error = None;
                        entry.invalidated = false;
                    }
                    Err(err) => {
                        log::warn!("Query {key} failed: {err}");
                        entry.last_error = Some(err);
                    }
                }
            }
            return Step::Ready(entry.state(self.stale_time));
        }

        log::debug!("Discarding superseded response for {key}");
        if let Some((newer, shared)) = &entry.in_flight {
            return Step::Wait(*newer, shared.clone());
        }
        if entry.applied == entry.generation && !entry.invalidated {
            return Step::Ready(entry.state(self.stale_time));
        }
        // Invalidated while in flight: the response may predate the write.
        let (generation, shared) = entry.start(fetcher);
        Step::Wait(generation, shared)
    }

    /// Current state of a key without any I/O.
    pub fn peek(&self, key: &QueryKey) -> QueryState<Arc<Payload>> {
        self.entries
            .lock()
            .get(key)
            .map_or_else(QueryState::idle, |entry| entry.state(self.stale_time))
    }

    /// Marks matching entries stale and abandons their in-flight requests.
    /// Cached data stays visible until the next read replaces it.
    pub fn invalidate(&self, pattern: &KeyPattern) -> usize {
        let mut entries = self.entries.lock();
        let mut count = 0;
        for (key, entry) in entries.iter_mut().filter(|(key, _)| pattern.matches(key)) {
            log::debug!("Invalidating {key}");
            entry.invalidated = true;
            if entry.in_flight.take().is_some() {
                entry.generation += 1;
            }
            count += 1;
        }
        count
    }

    pub fn remove(&self, key: &QueryKey) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
