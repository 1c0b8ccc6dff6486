//! # Screen Client
//!
//! High-level API for the order screen actor. It wraps a `FrameClient<OrderScreen>`,
//! and it is also the [`SnapshotSink`] the synchronizer feeds.
use crate::disclosure::ToggleOutcome;
use crate::model::OrderId;
use crate::presentation::{OrderDetail, OrderRow, TrackingOverlay};
use crate::screen::{OrderScreen, ScreenError, ScreenRequest};
use crate::sync::{FeedError, FeedUpdate, SnapshotSink};
use async_trait::async_trait;
use timeline_actor::{ActorClient, FrameClient, FrameworkError};
use tracing::{debug, instrument, warn};

/// Client for interacting with the order screen.
#[derive(Clone)]
pub struct ScreenClient {
    inner: FrameClient<OrderScreen>,
}

impl ScreenClient {
    pub fn new(inner: FrameClient<OrderScreen>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, update), fields(revision = update.snapshot.revision(), error = update.error.is_some()))]
    pub async fn apply_update(&self, update: FeedUpdate) -> Result<(), ScreenError> {
        self.call(|respond_to| ScreenRequest::ApplyUpdate { update, respond_to })
            .await
    }

    /// Expands or collapses an order's row.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn toggle(&self, order_id: OrderId) -> Result<ToggleOutcome, ScreenError> {
        debug!("toggle called");
        self.call(|respond_to| ScreenRequest::Toggle {
            order_id,
            respond_to,
        })
        .await
    }

    /// Opens the tracking overlay for an order.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn track(&self, order_id: OrderId) -> Result<TrackingOverlay, ScreenError> {
        self.call(|respond_to| ScreenRequest::Track {
            order_id,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn close_tracking(&self) -> Result<bool, ScreenError> {
        self.call(|respond_to| ScreenRequest::CloseTracking { respond_to })
            .await
    }

    pub async fn rows(&self) -> Result<Vec<OrderRow>, ScreenError> {
        self.call(|respond_to| ScreenRequest::Rows { respond_to }).await
    }

    pub async fn overlay(&self) -> Result<Option<TrackingOverlay>, ScreenError> {
        self.call(|respond_to| ScreenRequest::Overlay { respond_to })
            .await
    }

    /// The navigation payload for an order's detail screen.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn detail(&self, order_id: OrderId) -> Result<OrderDetail, ScreenError> {
        self.call(|respond_to| ScreenRequest::Detail {
            order_id,
            respond_to,
        })
        .await
    }

    pub async fn last_error(&self) -> Result<Option<FeedError>, ScreenError> {
        self.call(|respond_to| ScreenRequest::LastError { respond_to })
            .await
    }
}

#[async_trait]
impl ActorClient<OrderScreen> for ScreenClient {
    type Error = ScreenError;

    fn inner(&self) -> &FrameClient<OrderScreen> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(order_id) => ScreenError::UnknownOrder(order_id),
            other => ScreenError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl SnapshotSink for ScreenClient {
    async fn deliver(&mut self, update: FeedUpdate) {
        if let Err(e) = self.apply_update(update).await {
            warn!(error = %e, "Failed to hand update to screen");
        }
    }
}
