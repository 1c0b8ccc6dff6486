//! # Disclosure State
//!
//! Tracks which orders are expanded and animates each row's height. The fully expanded
//! height is `item_count * row_height`. Entries live in a [`Registry`] keyed by
//! [`OrderId`], created on the first toggle and pruned when the order leaves the snapshot.
//!
//! Per order, toggling is serialized: a toggle that arrives while that order is still
//! animating is queued and applied when the animation completes. Two queued toggles
//! cancel out.

use crate::config::TimelineConfig;
use crate::model::OrderId;
use crate::sync::OrderSnapshot;
use serde::Serialize;
use std::time::Duration;
use timeline_actor::{Registry, Tween};
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DisclosurePhase {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

impl DisclosurePhase {
    fn is_open(self) -> bool {
        matches!(self, DisclosurePhase::Expanding | DisclosurePhase::Expanded)
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Expanding,
    Collapsing,
    /// Expanded without animation (no items).
    Expanded,
    /// Collapsed without animation (no items).
    Collapsed,
    /// The order was mid-animation; the toggle runs once it completes.
    Queued,
}

#[derive(Debug, Clone, Default)]
struct DisclosureEntry {
    phase: DisclosurePhase,
    /// 0 = collapsed, 1 = fully expanded.
    progress: f32,
    tween: Option<Tween>,
    queued_toggle: bool,
    item_count: usize,
}

impl DisclosureEntry {
    fn start(&mut self, target: f32, now: Instant, duration: Duration) {
        if let Some(tween) = self.tween.take() {
            self.progress = tween.settle();
        }
        self.tween = Some(Tween::new(self.progress, target, now, duration));
    }

    fn expand(&mut self, now: Instant, duration: Duration) -> ToggleOutcome {
        if self.item_count == 0 {
            self.tween = None;
            self.progress = 1.0;
            self.phase = DisclosurePhase::Expanded;
            return ToggleOutcome::Expanded;
        }
        self.start(1.0, now, duration);
        self.phase = DisclosurePhase::Expanding;
        ToggleOutcome::Expanding
    }

    fn collapse(&mut self, now: Instant, duration: Duration) -> ToggleOutcome {
        if self.item_count == 0 {
            self.tween = None;
            self.progress = 0.0;
            self.phase = DisclosurePhase::Collapsed;
            return ToggleOutcome::Collapsed;
        }
        self.start(0.0, now, duration);
        self.phase = DisclosurePhase::Collapsing;
        ToggleOutcome::Collapsing
    }

    /// Returns `true` when an animation finished on this frame.
    fn advance(&mut self, now: Instant) -> bool {
        let Some(tween) = self.tween else {
            return false;
        };
        self.progress = tween.value_at(now);
        if !tween.is_finished(now) {
            return false;
        }
        self.tween = None;
        self.phase = if self.progress >= 1.0 {
            DisclosurePhase::Expanded
        } else {
            DisclosurePhase::Collapsed
        };
        true
    }
}

/// Expand/collapse state for every row of the timeline.
#[derive(Debug)]
pub struct DisclosureManager {
    entries: Registry<OrderId, DisclosureEntry>,
    row_height: f32,
    duration: Duration,
    exclusive: bool,
}

impl DisclosureManager {
    pub fn new(row_height: f32, duration: Duration, exclusive: bool) -> Self {
        Self {
            entries: Registry::new(),
            row_height,
            duration,
            exclusive,
        }
    }

    pub fn from_config(config: &TimelineConfig) -> Self {
        Self::new(
            config.row_height,
            config.disclosure_duration(),
            config.exclusive_expansion,
        )
    }

    pub fn toggle(&mut self, order_id: &OrderId, item_count: usize, now: Instant) -> ToggleOutcome {
        let phase = self.phase(order_id);
        let outcome = match phase {
            DisclosurePhase::Expanding | DisclosurePhase::Collapsing => {
                let entry = self.entries.get_or_insert_with(order_id, DisclosureEntry::default);
                entry.item_count = item_count;
                entry.queued_toggle = !entry.queued_toggle;
                ToggleOutcome::Queued
            }
            DisclosurePhase::Expanded => {
                let duration = self.duration;
                let entry = self.entries.get_or_insert_with(order_id, DisclosureEntry::default);
                entry.item_count = item_count;
                entry.collapse(now, duration)
            }
            DisclosurePhase::Collapsed => {
                if self.exclusive {
                    self.collapse_others(order_id, now);
                }
                let duration = self.duration;
                let entry = self.entries.get_or_insert_with(order_id, DisclosureEntry::default);
                entry.item_count = item_count;
                entry.expand(now, duration)
            }
        };
        debug!(order_id = %order_id, ?phase, ?outcome, "Disclosure toggled");
        outcome
    }

    fn collapse_others(&mut self, order_id: &OrderId, now: Instant) {
        let duration = self.duration;
        for (id, entry) in self.entries.iter_mut() {
            if id != order_id && entry.phase.is_open() {
                entry.queued_toggle = false;
                entry.collapse(now, duration);
                debug!(order_id = %id, "Collapsing previously expanded order");
            }
        }
    }

    pub fn on_frame(&mut self, now: Instant) {
        let mut queued = Vec::new();
        for (id, entry) in self.entries.iter_mut() {
            if entry.advance(now) && entry.queued_toggle {
                entry.queued_toggle = false;
                queued.push((id.clone(), entry.item_count));
            }
        }
        for (id, item_count) in queued {
            self.toggle(&id, item_count, now);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.entries.iter().any(|(_, entry)| entry.tween.is_some())
    }

    pub fn phase(&self, order_id: &OrderId) -> DisclosurePhase {
        self.entries
            .get(order_id)
            .map(|entry| entry.phase)
            .unwrap_or_default()
    }

    fn full_height(&self, item_count: usize) -> f32 {
        item_count as f32 * self.row_height
    }

    /// Height as of the last frame.
    pub fn height(&self, order_id: &OrderId) -> f32 {
        self.entries
            .get(order_id)
            .map(|entry| entry.progress * self.full_height(entry.item_count))
            .unwrap_or(0.0)
    }

    /// The height the row is at or heading to.
    pub fn target_height(&self, order_id: &OrderId) -> f32 {
        match self.entries.get(order_id) {
            Some(entry) if entry.phase.is_open() => self.full_height(entry.item_count),
            _ => 0.0,
        }
    }

    /// Drops entries for orders no longer in `snapshot` and refreshes item counts.
    /// Returns the number of entries removed.
    pub fn retain(&mut self, snapshot: &OrderSnapshot) -> usize {
        let removed = self.entries.retain_live(&snapshot.ids());
        for (id, entry) in self.entries.iter_mut() {
            if let Some(order) = snapshot.get(id) {
                entry.item_count = order.item_count();
            }
        }
        if removed > 0 {
            debug!(removed, "Pruned disclosure entries");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize_value;
    use serde_json::json;

    const DURATION: Duration = Duration::from_millis(300);

    fn manager(exclusive: bool) -> DisclosureManager {
        DisclosureManager::new(100.0, DURATION, exclusive)
    }

    fn id(s: &str) -> OrderId {
        OrderId::from(s)
    }

    #[test]
    fn test_expand_then_collapse_returns_to_collapsed() {
        let mut m = manager(true);
        let t0 = Instant::now();
        let a = id("a");

        assert_eq!(m.toggle(&a, 3, t0), ToggleOutcome::Expanding);
        assert_eq!(m.target_height(&a), 300.0);
        m.on_frame(t0 + DURATION / 2);
        assert!(m.height(&a) > 0.0 && m.height(&a) < 300.0);
        m.on_frame(t0 + DURATION);
        assert_eq!(m.phase(&a), DisclosurePhase::Expanded);
        assert_eq!(m.height(&a), 300.0);

        let t1 = t0 + DURATION;
        assert_eq!(m.toggle(&a, 3, t1), ToggleOutcome::Collapsing);
        m.on_frame(t1 + DURATION);
        assert_eq!(m.phase(&a), DisclosurePhase::Collapsed);
        assert_eq!(m.target_height(&a), 0.0);
        assert_eq!(m.height(&a), 0.0);
        assert!(!m.is_animating());
    }

    #[test]
    fn test_toggle_mid_animation_is_queued() {
        let mut m = manager(true);
        let t0 = Instant::now();
        let a = id("a");

        m.toggle(&a, 2, t0);
        assert_eq!(m.toggle(&a, 2, t0 + DURATION / 3), ToggleOutcome::Queued);
        assert_eq!(m.phase(&a), DisclosurePhase::Expanding);

        // Completion applies the queued toggle.
        m.on_frame(t0 + DURATION);
        assert_eq!(m.phase(&a), DisclosurePhase::Collapsing);
        m.on_frame(t0 + DURATION * 2);
        assert_eq!(m.phase(&a), DisclosurePhase::Collapsed);
    }

    #[test]
    fn test_two_queued_toggles_cancel_out() {
        let mut m = manager(true);
        let t0 = Instant::now();
        let a = id("a");

        m.toggle(&a, 2, t0);
        m.toggle(&a, 2, t0);
        m.toggle(&a, 2, t0);
        m.on_frame(t0 + DURATION);
        assert_eq!(m.phase(&a), DisclosurePhase::Expanded);
        assert!(!m.is_animating());
    }

    #[test]
    fn test_exclusive_expansion_collapses_other_order() {
        let mut m = manager(true);
        let t0 = Instant::now();
        let (a, b) = (id("a"), id("b"));

        m.toggle(&a, 1, t0);
        // A is still expanding: it settles at fully open, then collapses.
        m.toggle(&b, 1, t0 + DURATION / 2);
        assert_eq!(m.phase(&a), DisclosurePhase::Collapsing);
        assert_eq!(m.phase(&b), DisclosurePhase::Expanding);
        assert_eq!(m.height(&a), 100.0);

        m.on_frame(t0 + DURATION * 2);
        assert_eq!(m.phase(&a), DisclosurePhase::Collapsed);
        assert_eq!(m.phase(&b), DisclosurePhase::Expanded);
    }

    #[test]
    fn test_non_exclusive_allows_many_expanded() {
        let mut m = manager(false);
        let t0 = Instant::now();
        let (a, b) = (id("a"), id("b"));
        m.toggle(&a, 1, t0);
        m.toggle(&b, 1, t0);
        m.on_frame(t0 + DURATION);
        assert_eq!(m.phase(&a), DisclosurePhase::Expanded);
        assert_eq!(m.phase(&b), DisclosurePhase::Expanded);
    }

    #[test]
    fn test_zero_items_expand_without_height() {
        let mut m = manager(true);
        let t0 = Instant::now();
        let a = id("a");

        assert_eq!(m.toggle(&a, 0, t0), ToggleOutcome::Expanded);
        assert_eq!(m.phase(&a), DisclosurePhase::Expanded);
        assert_eq!(m.target_height(&a), 0.0);
        assert!(!m.is_animating());
        assert_eq!(m.toggle(&a, 0, t0), ToggleOutcome::Collapsed);
    }

    #[test]
    fn test_retain_prunes_vanished_orders() {
        let mut m = manager(false);
        let t0 = Instant::now();
        m.toggle(&id("a"), 1, t0);
        m.toggle(&id("b"), 1, t0);
        m.on_frame(t0 + DURATION);

        let order = normalize_value(&json!({
            "orderId": "b",
            "items": [{ "name": "x" }, { "name": "y" }]
        }))
        .unwrap();
        let snapshot = OrderSnapshot::new(vec![order], 2);

        assert_eq!(m.retain(&snapshot), 1);
        assert_eq!(m.len(), 1);
        assert_eq!(m.phase(&id("a")), DisclosurePhase::Collapsed);
        assert_eq!(m.target_height(&id("b")), 200.0);

        m.clear();
        assert!(m.is_empty());
    }
}
