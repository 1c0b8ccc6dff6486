//! # Feed Seam
//!
//! The remote store is reached only through [`OrderFeed`]. An implementation opens a
//! per-user stream of raw record batches; each batch is the user's complete order set
//! at that moment, not a delta.

use crate::model::UserId;
use crate::sync::FeedError;
use async_trait::async_trait;
use futures_util::stream::{self, Stream, StreamExt};
use serde_json::Value;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// One push from the store: every raw order document for the user.
pub type RawBatch = Vec<Value>;

pub type FeedStream = Pin<Box<dyn Stream<Item = Result<RawBatch, FeedError>> + Send>>;

#[async_trait]
pub trait OrderFeed: Send + Sync + 'static {
    /// Opens a live stream of batches for `user_id`. The stream ends when the feed
    /// has nothing more to send; dropping it releases the remote listener.
    async fn open(&self, user_id: &UserId) -> Result<FeedStream, FeedError>;
}

/// In-memory [`OrderFeed`] backed by a broadcast channel.
///
/// New listeners immediately receive the latest pushed batch, then every later push.
/// Cloning shares the same channel.
#[derive(Clone)]
pub struct ChannelFeed {
    inner: Arc<ChannelFeedInner>,
}

struct ChannelFeedInner {
    sender: broadcast::Sender<Result<RawBatch, FeedError>>,
    latest: Mutex<Option<RawBatch>>,
    available: AtomicBool,
    closed: CancellationToken,
}

impl ChannelFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Arc::new(ChannelFeedInner {
                sender,
                latest: Mutex::new(None),
                available: AtomicBool::new(true),
                closed: CancellationToken::new(),
            }),
        }
    }

    /// Replaces the user's order set.
    pub fn push(&self, batch: RawBatch) {
        if let Ok(mut latest) = self.inner.latest.lock() {
            *latest = Some(batch.clone());
        }
        let receivers = self.inner.sender.send(Ok(batch)).unwrap_or(0);
        debug!(receivers, "Batch pushed");
    }

    /// Emits a transport error to every open stream.
    pub fn push_error(&self, error: FeedError) {
        let _ = self.inner.sender.send(Err(error));
    }

    /// While unavailable, `open` fails with [`FeedError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    /// Ends every open stream. Later `open` calls fail with [`FeedError::Closed`].
    pub fn close(&self) {
        self.inner.closed.cancel();
        info!("Feed closed");
    }

    /// Number of open streams.
    pub fn listener_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }
}

impl Default for ChannelFeed {
    fn default() -> Self {
        Self::new(16)
    }
}

#[async_trait]
impl OrderFeed for ChannelFeed {
    async fn open(&self, user_id: &UserId) -> Result<FeedStream, FeedError> {
        if self.inner.closed.is_cancelled() {
            return Err(FeedError::Closed);
        }
        if !self.inner.available.load(Ordering::SeqCst) {
            return Err(FeedError::Unavailable(format!(
                "no listener available for user {user_id}"
            )));
        }

        // Subscribe before reading the latest batch so nothing pushed in between is lost.
        let receiver = self.inner.sender.subscribe();
        let replay = self
            .inner
            .latest
            .lock()
            .map(|latest| latest.clone())
            .unwrap_or(None);

        info!(user_id = %user_id, replay = replay.is_some(), "Feed listener opened");

        let closed = self.inner.closed.clone();
        let live = BroadcastStream::new(receiver)
            .map(|item| match item {
                Ok(batch) => batch,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => Err(FeedError::Lagged(skipped)),
            })
            .take_until(async move { closed.cancelled().await });
        Ok(Box::pin(stream::iter(replay.map(Ok)).chain(live)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_open_replays_latest_batch() {
        let feed = ChannelFeed::new(8);
        feed.push(vec![json!({ "orderId": "a" })]);
        feed.push(vec![json!({ "orderId": "b" })]);

        let mut stream = feed.open(&UserId::from("u1")).await.unwrap();
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first, vec![json!({ "orderId": "b" })]);

        feed.push_error(FeedError::Transport("reset".into()));
        assert_eq!(
            stream.next().await.unwrap(),
            Err(FeedError::Transport("reset".into()))
        );
    }

    #[tokio::test]
    async fn test_unavailable_feed_fails_to_open() {
        let feed = ChannelFeed::default();
        feed.set_available(false);
        let result = feed.open(&UserId::from("u1")).await;
        assert!(matches!(result, Err(FeedError::Unavailable(_))));
        assert_eq!(feed.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_close_ends_open_streams() {
        let feed = ChannelFeed::default();
        let mut stream = feed.open(&UserId::from("u1")).await.unwrap();
        feed.close();
        assert!(stream.next().await.is_none());
        assert!(matches!(
            feed.open(&UserId::from("u1")).await,
            Err(FeedError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_dropping_stream_releases_listener() {
        let feed = ChannelFeed::default();
        let stream = feed.open(&UserId::from("u1")).await.unwrap();
        assert_eq!(feed.listener_count(), 1);
        drop(stream);
        assert_eq!(feed.listener_count(), 0);
    }
}
