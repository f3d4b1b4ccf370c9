//! Generic write hook.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{ApiError, ApiResult};

/// Tracks writes of one kind. It performs no retries and touches no cache;
/// callers decide what a successful write invalidates.
#[derive(Clone, Debug, Default)]
pub struct MutationHook {
    pending: Arc<AtomicUsize>,
}

struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MutationHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    /// Runs one write, counting it as pending until it resolves or is dropped.
    pub async fn run<T, Fut>(&self, write: Fut) -> ApiResult<T>
    where
        Fut: Future<Output = ApiResult<T>>,
    {
        self.pending.fetch_add(1, Ordering::SeqCst);
        let _guard = PendingGuard(self.pending.clone());
        write.await
    }

    /// Callback form: exactly one of `on_success` and `on_error` is called.
    pub async fn mutate<T, Fut, S, E>(&self, write: Fut, on_success: S, on_error: E)
    where
        Fut: Future<Output = ApiResult<T>>,
        S: FnOnce(T),
        E: FnOnce(ApiError),
    {
        match self.run(write).await {
            Ok(value) => on_success(value),
            Err(err) => {
                log::error!("Mutation failed: {err}");
                on_error(err)
            }
        }
    }
}
