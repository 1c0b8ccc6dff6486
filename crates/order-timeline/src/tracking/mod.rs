//! # Lifecycle Tracking
//!
//! Orders move along a fixed path of five steps. Cancellation sits outside that path:
//! it is reachable from any step except the last, and nothing leaves it.
//!
//! ```text
//! Pending ──▶ Processing ──▶ Confirmed ──▶ Shipped ──▶ Delivered
//!    │            │              │            │
//!    └────────────┴──────────────┴────────────┴──────▶ Cancelled
//! ```
//!
//! [`TrackingProgress`] animates the progress indicator for the one order whose
//! tracking overlay is open. Each step owns an independent [`Tween`] toward 1 (reached)
//! or 0 (not reached); a status change settles in-flight tweens before retargeting.

use crate::model::{Order, OrderId, OrderStatus};
use serde::Serialize;
use std::time::Duration;
use timeline_actor::Tween;
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LifecycleStep {
    Pending,
    Processing,
    Confirmed,
    Shipped,
    Delivered,
}

impl LifecycleStep {
    pub const ALL: [LifecycleStep; 5] = [
        LifecycleStep::Pending,
        LifecycleStep::Processing,
        LifecycleStep::Confirmed,
        LifecycleStep::Shipped,
        LifecycleStep::Delivered,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn status(self) -> OrderStatus {
        match self {
            LifecycleStep::Pending => OrderStatus::Pending,
            LifecycleStep::Processing => OrderStatus::Processing,
            LifecycleStep::Confirmed => OrderStatus::Confirmed,
            LifecycleStep::Shipped => OrderStatus::Shipped,
            LifecycleStep::Delivered => OrderStatus::Delivered,
        }
    }
}

/// Position of a status on the lifecycle path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIndex {
    Step(usize),
    Cancelled,
}

pub fn step_index(status: &OrderStatus) -> StepIndex {
    match status {
        OrderStatus::Pending | OrderStatus::Unknown(_) => StepIndex::Step(0),
        OrderStatus::Processing => StepIndex::Step(1),
        OrderStatus::Confirmed => StepIndex::Step(2),
        OrderStatus::Shipped => StepIndex::Step(3),
        OrderStatus::Delivered => StepIndex::Step(4),
        OrderStatus::Cancelled => StepIndex::Cancelled,
    }
}

/// Whether lifecycle step `step` has been reached. Never true for a cancelled order.
pub fn is_reached(step: usize, status: &OrderStatus) -> bool {
    match step_index(status) {
        StepIndex::Step(current) => step <= current,
        StepIndex::Cancelled => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Apply,
    NoOp,
    Rejected,
}

/// Classifies a status change reported by the feed.
///
/// The feed is authoritative, so moves backwards along the normal path are applied.
/// Only leaving `Cancelled` and cancelling a delivered order are rejected.
pub fn transition(from: &OrderStatus, to: &OrderStatus) -> Transition {
    if from == to {
        return Transition::NoOp;
    }
    match (from, to) {
        (OrderStatus::Cancelled, _) => Transition::Rejected,
        (OrderStatus::Delivered, OrderStatus::Cancelled) => Transition::Rejected,
        _ => Transition::Apply,
    }
}

/// A row of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrackedStep {
    Lifecycle(LifecycleStep),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepView {
    pub step: TrackedStep,
    /// Animated value in `[0, 1]`.
    pub progress: f32,
    pub reached: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct StepProgress {
    value: f32,
    tween: Option<Tween>,
}

impl StepProgress {
    fn drive_to(&mut self, target: f32, now: Instant, duration: Duration) {
        if let Some(tween) = self.tween.take() {
            self.value = tween.settle();
        }
        if self.value != target {
            self.tween = Some(Tween::new(self.value, target, now, duration));
        }
    }

    fn advance(&mut self, now: Instant) {
        if let Some(tween) = self.tween {
            self.value = tween.value_at(now);
            if tween.is_finished(now) {
                self.tween = None;
            }
        }
    }
}

/// Progress animation for the tracked order.
#[derive(Debug, Clone)]
pub struct TrackingProgress {
    order_id: OrderId,
    status: OrderStatus,
    steps: [StepProgress; 5],
    cancelled: StepProgress,
    duration: Duration,
    rejected: Option<OrderStatus>,
}

impl TrackingProgress {
    /// Starts every step at 0 and animates toward the order's current status.
    pub fn open(order: &Order, now: Instant, duration: Duration) -> Self {
        let mut progress = Self {
            order_id: order.order_id.clone(),
            status: order.status.clone(),
            steps: [StepProgress::default(); 5],
            cancelled: StepProgress::default(),
            duration,
            rejected: None,
        };
        progress.retarget(now);
        debug!(order_id = %progress.order_id, status = %progress.status, "Tracking opened");
        progress
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    /// The latest feed status that was refused as a transition, if the feed still
    /// reports it. While set, the order's row shows this status and the overlay keeps
    /// showing [`status`](Self::status).
    pub fn rejected_status(&self) -> Option<&OrderStatus> {
        self.rejected.as_ref()
    }

    /// Applies a status reported by the feed. Returns whether anything changed.
    ///
    /// A rejected transition (for example delivered to cancelled) leaves the progress
    /// untouched and is remembered in [`rejected_status`](Self::rejected_status)
    /// until the feed reports an acceptable status again.
    pub fn set_status(&mut self, status: OrderStatus, now: Instant) -> bool {
        match transition(&self.status, &status) {
            Transition::NoOp => {
                self.rejected = None;
                false
            }
            Transition::Rejected => {
                warn!(
                    order_id = %self.order_id,
                    from = %self.status,
                    to = %status,
                    "Ignoring invalid status transition"
                );
                self.rejected = Some(status);
                false
            }
            Transition::Apply => {
                debug!(order_id = %self.order_id, from = %self.status, to = %status, "Status changed");
                self.status = status;
                self.rejected = None;
                self.retarget(now);
                true
            }
        }
    }

    fn retarget(&mut self, now: Instant) {
        let duration = self.duration;
        for step in LifecycleStep::ALL {
            let target = if is_reached(step.index(), &self.status) {
                1.0
            } else {
                0.0
            };
            self.steps[step.index()].drive_to(target, now, duration);
        }
        let cancelled = if self.status.is_cancelled() { 1.0 } else { 0.0 };
        self.cancelled.drive_to(cancelled, now, duration);
    }

    pub fn is_reached(&self, step: TrackedStep) -> bool {
        match step {
            TrackedStep::Lifecycle(s) => is_reached(s.index(), &self.status),
            TrackedStep::Cancelled => self.status.is_cancelled(),
        }
    }

    pub fn progress(&self, step: TrackedStep) -> f32 {
        match step {
            TrackedStep::Lifecycle(s) => self.steps[s.index()].value,
            TrackedStep::Cancelled => self.cancelled.value,
        }
    }

    /// The steps to draw: the full path, or only the cancelled step once cancelled.
    pub fn visible_steps(&self) -> Vec<StepView> {
        let steps: Vec<TrackedStep> = if self.status.is_cancelled() {
            vec![TrackedStep::Cancelled]
        } else {
            LifecycleStep::ALL
                .into_iter()
                .map(TrackedStep::Lifecycle)
                .collect()
        };
        steps
            .into_iter()
            .map(|step| StepView {
                step,
                progress: self.progress(step),
                reached: self.is_reached(step),
            })
            .collect()
    }

    pub fn on_frame(&mut self, now: Instant) {
        for step in &mut self.steps {
            step.advance(now);
        }
        self.cancelled.advance(now);
    }

    pub fn is_animating(&self) -> bool {
        self.cancelled.tween.is_some() || self.steps.iter().any(|s| s.tween.is_some())
    }
}
