//! Receivers of synchronizer deliveries.

use crate::sync::FeedUpdate;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

/// Where a subscription hands each update. Deliveries for one subscription are
/// sequential: the next batch is not read until `deliver` returns.
#[async_trait]
pub trait SnapshotSink: Send + 'static {
    async fn deliver(&mut self, update: FeedUpdate);
}

#[async_trait]
impl SnapshotSink for mpsc::Sender<FeedUpdate> {
    async fn deliver(&mut self, update: FeedUpdate) {
        if self.send(update).await.is_err() {
            debug!("Update receiver dropped");
        }
    }
}

/// A sink wrapping a synchronous callback. See [`sink_fn`].
pub struct FnSink<F>(F);

/// Adapts a closure into a [`SnapshotSink`].
pub fn sink_fn<F>(callback: F) -> FnSink<F>
where
    F: FnMut(FeedUpdate) + Send + 'static,
{
    FnSink(callback)
}

#[async_trait]
impl<F> SnapshotSink for FnSink<F>
where
    F: FnMut(FeedUpdate) + Send + 'static,
{
    async fn deliver(&mut self, update: FeedUpdate) {
        (self.0)(update)
    }
}
