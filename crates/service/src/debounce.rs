use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use configs::ListingConfig;
use tokio::task::JoinHandle;
use tracing::trace;

/// Coalesces rapid calls (e.g. search-box keystrokes) into one delayed action.
///
/// Only the most recent call still waiting when its delay elapses runs.
/// Actions that already started are never cancelled, so responses of
/// superseded queries can still arrive out of order.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self { Self { delay, generation: Arc::new(AtomicU64::new(0)) } }

    pub fn from_config(cfg: &ListingConfig) -> Self { Self::new(Duration::from_millis(cfg.debounce_ms)) }

    pub fn delay(&self) -> Duration { self.delay }

    /// Schedule `action`. The handle resolves to `true` if it ran, `false` if a
    /// newer call superseded it first.
    pub fn call<F>(&self, action: F) -> JoinHandle<bool>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) != ticket {
                trace!(ticket, "debounced call superseded");
                return false;
            }
            action.await;
            true
        })
    }
}
