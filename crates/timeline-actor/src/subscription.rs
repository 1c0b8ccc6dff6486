//! # Subscriptions
//!
//! A [`Subscription`] is a background task paired with a [`CancellationToken`]. It is the
//! handle returned to whoever started a long-lived feed, and the only way to stop it.
//!
//! ## Teardown contract
//!
//! - [`Subscription::unsubscribe`] cancels the token and then awaits the task, so once
//!   it returns the task has finished and can no longer deliver anything.
//! - Calling it again is a no-op that returns `false`.
//! - Dropping a live subscription aborts the task.
//!
//! Tasks must observe the token between deliveries:
//!
//! ```rust
//! use timeline_actor::Subscription;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut sub = Subscription::spawn("ticker", |token| async move {
//!         loop {
//!             tokio::select! {
//!                 _ = token.cancelled() => break,
//!                 _ = tokio::time::sleep(std::time::Duration::from_millis(5)) => {}
//!             }
//!         }
//!     });
//!     assert!(sub.unsubscribe().await);
//!     assert!(!sub.unsubscribe().await);
//! }
//! ```

use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Handle to a cancellable background task.
pub struct Subscription {
    label: String,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Spawns `task` with a fresh cancellation token.
    pub fn spawn<F, Fut>(label: impl Into<String>, task: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let label = label.into();
        let token = CancellationToken::new();
        let handle = tokio::spawn(task(token.clone()));
        debug!(label = %label, "Subscription started");
        Self {
            label,
            token,
            handle: Some(handle),
        }
    }

    /// Whether the subscription is still running.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the task and waits for it to finish.
    ///
    /// Returns `true` only for the call that actually tore the subscription down.
    pub async fn unsubscribe(&mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        self.token.cancel();
        if let Err(e) = handle.await {
            warn!(label = %self.label, error = %e, "Subscription task ended abnormally");
        }
        info!(label = %self.label, "Unsubscribed");
        true
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.token.cancel();
            handle.abort();
            debug!(label = %self.label, "Subscription dropped while active");
        }
    }
}
