//! # Order Feed Synchronizer
//!
//! Keeps an up-to-date, sorted [`OrderSnapshot`] for one user. Every batch from the
//! [`OrderFeed`] is normalized record by record; a record that fails to decode is
//! dropped on its own and never takes the rest of the batch with it.
//!
//! ```text
//! OrderFeed ──batch──▶ decode + normalize ──▶ dedupe ──▶ sort desc by date ──▶ SnapshotSink
//!                └─err─────────────────────────── last snapshot + error ─────▶ SnapshotSink
//! ```
//!
//! Each subscription runs in its own task, wrapped in a [`Subscription`]. Cancellation
//! is checked before each read and before each delivery, never during one, so once
//! [`Subscription::unsubscribe`] returns every started delivery has landed and the sink
//! sees nothing further.

pub mod error;
pub mod feed;
pub mod sink;

pub use error::FeedError;
pub use feed::{ChannelFeed, FeedStream, OrderFeed, RawBatch};
pub use sink::{sink_fn, FnSink, SnapshotSink};

use crate::model::{Order, OrderId, UserId};
use crate::normalizer::normalize_value;
use futures_util::StreamExt;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use timeline_actor::Subscription;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// An immutable, sorted list of orders. Cloning is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSnapshot {
    orders: Arc<[Order]>,
    revision: u64,
}

impl OrderSnapshot {
    pub fn new(orders: Vec<Order>, revision: u64) -> Self {
        Self {
            orders: orders.into(),
            revision,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Increases by one with every batch the subscription accepts. `0` means no batch yet.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.order_id == order_id)
    }

    pub fn ids(&self) -> HashSet<OrderId> {
        self.orders.iter().map(|o| o.order_id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for OrderSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// One delivery to a [`SnapshotSink`].
///
/// On a transport failure `snapshot` is the last good snapshot (empty before the
/// first batch) and `error` says what went wrong.
#[derive(Debug, Clone)]
pub struct FeedUpdate {
    pub snapshot: OrderSnapshot,
    pub error: Option<FeedError>,
}

/// Normalizes a raw batch into a snapshot.
///
/// Undecodable records and repeated order ids are dropped with a warning. The
/// survivors are sorted newest first; equal dates keep their feed order.
pub fn build_snapshot(batch: &[Value], revision: u64) -> OrderSnapshot {
    let mut seen = HashSet::with_capacity(batch.len());
    let mut orders = Vec::with_capacity(batch.len());
    let mut dropped = 0usize;

    for (index, value) in batch.iter().enumerate() {
        match normalize_value(value) {
            Ok(order) => {
                if seen.insert(order.order_id.clone()) {
                    orders.push(order);
                } else {
                    dropped += 1;
                    warn!(index, order_id = %order.order_id, "Dropping duplicate order record");
                }
            }
            Err(e) => {
                dropped += 1;
                warn!(index, error = %e, "Dropping malformed order record");
            }
        }
    }

    // `sort_by` is stable, so ties keep feed order.
    orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    debug!(revision, kept = orders.len(), dropped, "Snapshot built");
    OrderSnapshot::new(orders, revision)
}

/// Starts subscriptions against one [`OrderFeed`].
#[derive(Clone)]
pub struct OrderSynchronizer {
    feed: Arc<dyn OrderFeed>,
}

impl OrderSynchronizer {
    pub fn new(feed: Arc<dyn OrderFeed>) -> Self {
        Self { feed }
    }

    /// Subscribes `sink` to `user_id`'s orders. Returns immediately; the feed is opened
    /// in the background.
    pub fn subscribe(&self, user_id: UserId, sink: impl SnapshotSink) -> Subscription {
        let feed = Arc::clone(&self.feed);
        let label = format!("orders:{user_id}");
        Subscription::spawn(label, move |token| run_subscription(feed, user_id, sink, token))
    }
}

async fn run_subscription<K: SnapshotSink>(
    feed: Arc<dyn OrderFeed>,
    user_id: UserId,
    mut sink: K,
    token: CancellationToken,
) {
    let mut last = OrderSnapshot::empty();

    let opened = tokio::select! {
        biased;
        _ = token.cancelled() => return,
        opened = feed.open(&user_id) => opened,
    };
    let mut stream = match opened {
        Ok(stream) => stream,
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Failed to open order feed");
            let update = FeedUpdate {
                snapshot: last,
                error: Some(e),
            };
            if !token.is_cancelled() {
                sink.deliver(update).await;
            }
            return;
        }
    };

    let mut revision = 0u64;
    loop {
        let next = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            next = stream.next() => next,
        };

        let update = match next {
            Some(Ok(batch)) => {
                revision += 1;
                last = build_snapshot(&batch, revision);
                info!(user_id = %user_id, revision, orders = last.len(), "Order snapshot updated");
                FeedUpdate {
                    snapshot: last.clone(),
                    error: None,
                }
            }
            Some(Err(e)) => {
                warn!(user_id = %user_id, error = %e, "Order feed error");
                FeedUpdate {
                    snapshot: last.clone(),
                    error: Some(e),
                }
            }
            None => {
                info!(user_id = %user_id, "Order feed ended");
                if !token.is_cancelled() {
                    sink.deliver(FeedUpdate {
                        snapshot: last,
                        error: Some(FeedError::Closed),
                    })
                    .await;
                }
                break;
            }
        };

        // A delivery that has started runs to completion. `unsubscribe` awaits this
        // task, so the sink has fully applied it before that call returns.
        if token.is_cancelled() {
            break;
        }
        sink.deliver(update).await;
    }
}
