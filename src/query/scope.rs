//! Lifetime of one screen's requests.

use std::future::Future;

use tokio::sync::watch;

/// Results that resolve after [`ScreenScope::unmount`] are dropped.
#[derive(Debug)]
pub struct ScreenScope {
    unmounted: watch::Sender<bool>,
}

impl Default for ScreenScope {
    fn default() -> Self {
        let (unmounted, _) = watch::channel(false);
        Self { unmounted }
    }
}

impl ScreenScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `fut` unless the scope is unmounted first.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let mut unmounted = self.unmounted.subscribe();
        tokio::select! {
            biased;
            _ = unmounted.wait_for(|gone| *gone) => {
                log::debug!("Screen unmounted, ignoring pending result");
                None
            }
            output = fut => Some(output),
        }
    }

    pub fn unmount(&self) {
        self.unmounted.send_replace(true);
    }

    pub fn is_mounted(&self) -> bool {
        !*self.unmounted.borrow()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.unmounted.send_replace(true);
    }
}
