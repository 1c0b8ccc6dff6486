//! # Order Screen
//!
//! The state owned by the screen's [`FrameActor`]: the latest snapshot, the disclosure
//! state of every row, and the tracking progress of the one order whose overlay is open.
//! Feed updates, user interactions and animation frames all arrive in this one task,
//! so none of it needs locking.
//!
//! Methods on [`OrderScreen`] take the current instant explicitly, which is how the
//! unit tests below drive animations without a runtime clock.

pub mod error;

pub use error::ScreenError;

use crate::clients::ScreenClient;
use crate::config::TimelineConfig;
use crate::disclosure::{DisclosureManager, ToggleOutcome};
use crate::model::{Order, OrderId};
use crate::presentation::{
    assemble_rows, order_detail, tracking_overlay, OrderDetail, OrderRow, TrackingOverlay,
};
use crate::sync::{FeedError, FeedUpdate, OrderSnapshot};
use crate::tracking::TrackingProgress;
use timeline_actor::{reply, ActorState, FrameActor, FrameworkError, Response};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Messages understood by the screen actor.
#[derive(Debug)]
pub enum ScreenRequest {
    ApplyUpdate {
        update: FeedUpdate,
        respond_to: Response<()>,
    },
    Toggle {
        order_id: OrderId,
        respond_to: Response<ToggleOutcome>,
    },
    Track {
        order_id: OrderId,
        respond_to: Response<TrackingOverlay>,
    },
    CloseTracking {
        respond_to: Response<bool>,
    },
    Rows {
        respond_to: Response<Vec<OrderRow>>,
    },
    Overlay {
        respond_to: Response<Option<TrackingOverlay>>,
    },
    Detail {
        order_id: OrderId,
        respond_to: Response<OrderDetail>,
    },
    LastError {
        respond_to: Response<Option<FeedError>>,
    },
}

pub struct OrderScreen {
    config: TimelineConfig,
    snapshot: OrderSnapshot,
    disclosure: DisclosureManager,
    tracking: Option<TrackingProgress>,
    last_error: Option<FeedError>,
}

/// Creates the screen actor and its client.
pub fn new(config: TimelineConfig) -> (FrameActor<OrderScreen>, ScreenClient) {
    let buffer = config.actor_buffer;
    let frame_interval = config.frame_interval();
    let (actor, client) = FrameActor::new(OrderScreen::new(config), buffer, frame_interval);
    (actor, ScreenClient::new(client))
}

fn unknown(order_id: &OrderId) -> FrameworkError {
    FrameworkError::NotFound(order_id.to_string())
}

impl OrderScreen {
    pub fn new(config: TimelineConfig) -> Self {
        let disclosure = DisclosureManager::from_config(&config);
        Self {
            config,
            snapshot: OrderSnapshot::empty(),
            disclosure,
            tracking: None,
            last_error: None,
        }
    }

    fn order(&self, order_id: &OrderId) -> Result<&Order, FrameworkError> {
        self.snapshot.get(order_id).ok_or_else(|| unknown(order_id))
    }

    /// Replaces the snapshot, or records the error and keeps the current one.
    pub fn apply_update(&mut self, update: FeedUpdate, now: Instant) {
        if let Some(error) = update.error {
            warn!(revision = self.snapshot.revision(), error = %error, "Keeping snapshot after feed error");
            self.last_error = Some(error);
            return;
        }

        self.last_error = None;
        self.snapshot = update.snapshot;
        self.disclosure.retain(&self.snapshot);

        if let Some(progress) = self.tracking.as_mut() {
            match self.snapshot.get(progress.order_id()) {
                Some(order) => {
                    progress.set_status(order.status.clone(), now);
                }
                None => {
                    info!(order_id = %progress.order_id(), "Tracked order left the snapshot, closing overlay");
                    self.tracking = None;
                }
            }
        }
        debug!(revision = self.snapshot.revision(), orders = self.snapshot.len(), "Snapshot applied");
    }

    pub fn toggle(&mut self, order_id: &OrderId, now: Instant) -> Result<ToggleOutcome, FrameworkError> {
        let item_count = self.order(order_id)?.item_count();
        Ok(self.disclosure.toggle(order_id, item_count, now))
    }

    /// Opens the tracking overlay. Tracking the order that is already open keeps its
    /// animation running.
    pub fn track(&mut self, order_id: &OrderId, now: Instant) -> Result<TrackingOverlay, FrameworkError> {
        let order = self.snapshot.get(order_id).ok_or_else(|| unknown(order_id))?;
        let progress = match self.tracking.take() {
            Some(progress) if progress.order_id() == order_id => progress,
            _ => TrackingProgress::open(order, now, self.config.step_duration()),
        };
        let overlay = tracking_overlay(&progress, order);
        self.tracking = Some(progress);
        Ok(overlay)
    }

    /// Returns whether an overlay was open.
    pub fn close_tracking(&mut self) -> bool {
        self.tracking.take().is_some()
    }

    pub fn rows(&self) -> Vec<OrderRow> {
        assemble_rows(&self.snapshot, &self.disclosure, &self.config)
    }

    pub fn overlay(&self) -> Option<TrackingOverlay> {
        let progress = self.tracking.as_ref()?;
        let order = self.snapshot.get(progress.order_id())?;
        Some(tracking_overlay(progress, order))
    }

    pub fn detail(&self, order_id: &OrderId) -> Result<OrderDetail, FrameworkError> {
        Ok(order_detail(self.order(order_id)?, &self.config))
    }

    pub fn last_error(&self) -> Option<FeedError> {
        self.last_error.clone()
    }
}

impl ActorState for OrderScreen {
    type Request = ScreenRequest;
    type Context = ();

    fn handle(&mut self, request: ScreenRequest, _ctx: &(), now: Instant) {
        match request {
            ScreenRequest::ApplyUpdate { update, respond_to } => {
                self.apply_update(update, now);
                reply(respond_to, Ok(()));
            }
            ScreenRequest::Toggle {
                order_id,
                respond_to,
            } => reply(respond_to, self.toggle(&order_id, now)),
            ScreenRequest::Track {
                order_id,
                respond_to,
            } => reply(respond_to, self.track(&order_id, now)),
            ScreenRequest::CloseTracking { respond_to } => {
                reply(respond_to, Ok(self.close_tracking()))
            }
            ScreenRequest::Rows { respond_to } => reply(respond_to, Ok(self.rows())),
            ScreenRequest::Overlay { respond_to } => reply(respond_to, Ok(self.overlay())),
            ScreenRequest::Detail {
                order_id,
                respond_to,
            } => reply(respond_to, self.detail(&order_id)),
            ScreenRequest::LastError { respond_to } => reply(respond_to, Ok(self.last_error())),
        }
    }

    fn on_frame(&mut self, now: Instant) {
        self.disclosure.on_frame(now);
        if let Some(progress) = self.tracking.as_mut() {
            progress.on_frame(now);
        }
    }

    fn is_animating(&self) -> bool {
        self.disclosure.is_animating()
            || self
                .tracking
                .as_ref()
                .is_some_and(TrackingProgress::is_animating)
    }

    fn on_shutdown(&mut self) {
        self.disclosure.clear();
        self.tracking = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disclosure::DisclosurePhase;
    use crate::model::OrderStatus;
    use crate::sync::build_snapshot;
    use serde_json::json;

    fn update(statuses: &[(&str, &str)], revision: u64) -> FeedUpdate {
        let batch: Vec<_> = statuses
            .iter()
            .enumerate()
            .map(|(i, (id, status))| {
                json!({
                    "orderId": id,
                    "status": status,
                    "orderDate": format!("2026-01-{:02}T00:00:00Z", 20 - i),
                    "items": [{ "name": "Item", "price": "5", "quantity": 1 }]
                })
            })
            .collect();
        FeedUpdate {
            snapshot: build_snapshot(&batch, revision),
            error: None,
        }
    }

    #[test]
    fn test_unknown_order_is_not_found() {
        let mut screen = OrderScreen::new(TimelineConfig::default());
        let now = Instant::now();
        let missing = OrderId::from("nope");
        assert!(matches!(screen.toggle(&missing, now), Err(FrameworkError::NotFound(_))));
        assert!(matches!(screen.track(&missing, now), Err(FrameworkError::NotFound(_))));
        assert!(matches!(screen.detail(&missing), Err(FrameworkError::NotFound(_))));
    }

    #[test]
    fn test_feed_error_keeps_snapshot() {
        let mut screen = OrderScreen::new(TimelineConfig::default());
        let now = Instant::now();
        screen.apply_update(update(&[("a", "pending")], 1), now);

        screen.apply_update(
            FeedUpdate {
                snapshot: OrderSnapshot::empty(),
                error: Some(FeedError::Transport("offline".into())),
            },
            now,
        );
        assert_eq!(screen.rows().len(), 1);
        assert_eq!(screen.last_error(), Some(FeedError::Transport("offline".into())));

        screen.apply_update(update(&[("a", "pending")], 2), now);
        assert_eq!(screen.last_error(), None);
    }

    #[test]
    fn test_tracked_status_follows_feed() {
        let config = TimelineConfig::default();
        let step = config.step_duration();
        let mut screen = OrderScreen::new(config);
        let t0 = Instant::now();
        screen.apply_update(update(&[("a", "processing")], 1), t0);

        screen.track(&OrderId::from("a"), t0).unwrap();
        assert!(screen.is_animating());
        screen.on_frame(t0 + step);

        screen.apply_update(update(&[("a", "cancelled")], 2), t0 + step);
        let overlay = screen.overlay().unwrap();
        assert!(overlay.cancelled);
        assert_eq!(overlay.steps.len(), 1);

        // The order vanishes: the overlay closes with it.
        screen.apply_update(update(&[("b", "pending")], 3), t0 + step);
        assert!(screen.overlay().is_none());
        assert!(!screen.close_tracking());
    }

    #[test]
    fn test_refused_feed_status_is_flagged_on_overlay() {
        let mut screen = OrderScreen::new(TimelineConfig::default());
        let t0 = Instant::now();
        screen.apply_update(update(&[("a", "delivered")], 1), t0);
        screen.track(&OrderId::from("a"), t0).unwrap();

        screen.apply_update(update(&[("a", "cancelled")], 2), t0);
        assert_eq!(screen.rows()[0].status_label, "Cancelled");
        let overlay = screen.overlay().unwrap();
        assert!(!overlay.cancelled);
        assert_eq!(overlay.rejected_status, Some(OrderStatus::Cancelled));

        screen.apply_update(update(&[("a", "delivered")], 3), t0);
        assert_eq!(screen.overlay().unwrap().rejected_status, None);
    }

    #[test]
    fn test_disclosure_pruned_on_snapshot_replacement() {
        let config = TimelineConfig::default();
        let duration = config.disclosure_duration();
        let mut screen = OrderScreen::new(config);
        let t0 = Instant::now();
        screen.apply_update(update(&[("a", "pending"), ("b", "pending")], 1), t0);

        screen.toggle(&OrderId::from("a"), t0).unwrap();
        screen.on_frame(t0 + duration);
        assert_eq!(screen.rows()[0].phase, DisclosurePhase::Expanded);

        screen.apply_update(update(&[("b", "pending")], 2), t0 + duration);
        screen.apply_update(update(&[("a", "pending"), ("b", "pending")], 3), t0 + duration);
        assert_eq!(screen.rows()[0].phase, DisclosurePhase::Collapsed);
    }
}
