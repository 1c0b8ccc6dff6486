use order_timeline::config::TimelineConfig;
use order_timeline::disclosure::{DisclosurePhase, ToggleOutcome};
use order_timeline::lifecycle::TimelineSystem;
use order_timeline::model::{OrderId, UserId};
use order_timeline::presentation::OrderRow;
use order_timeline::screen::ScreenError;
use order_timeline::sync::{ChannelFeed, FeedError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn fixture() -> Vec<Value> {
    let text = include_str!("../fixtures/orders.json");
    serde_json::from_str(text).expect("fixture is valid JSON")
}

/// Polls the screen until `ready` accepts its rows.
async fn wait_for_rows(system: &TimelineSystem, ready: impl Fn(&[OrderRow]) -> bool) -> Vec<OrderRow> {
    for _ in 0..200 {
        let rows = system.client.rows().await.expect("rows");
        if ready(&rows) {
            return rows;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("screen never reached the expected rows");
}

fn ids(rows: &[OrderRow]) -> Vec<&str> {
    rows.iter().map(|r| r.order_id.0.as_str()).collect()
}

/// Full end-to-end test: feed -> synchronizer -> screen actor -> view-models.
#[tokio::test(start_paused = true)]
async fn test_fixture_flows_through_the_timeline() {
    let feed = ChannelFeed::default();
    feed.push(fixture());
    let config = TimelineConfig::default();
    let system = TimelineSystem::start(Arc::new(feed.clone()), UserId::from("u1"), config.clone());

    // One of the five records has no orderId and is dropped.
    let rows = wait_for_rows(&system, |rows| !rows.is_empty()).await;
    assert_eq!(ids(&rows), vec!["ord_1004", "ord_1001", "ord_0998", "ord_0990"]);
    assert_eq!(rows[1].total, "$122.80");
    assert_eq!(rows[2].status_label, "Delivered");
    assert_eq!(rows[0].items[0].quantity, 3);

    // Expand the newest order and let the animation finish.
    let newest = OrderId::from("ord_1004");
    assert_eq!(
        system.client.toggle(newest.clone()).await.unwrap(),
        ToggleOutcome::Expanding
    );
    tokio::time::sleep(config.disclosure_duration() * 2).await;
    let rows = system.client.rows().await.unwrap();
    assert_eq!(rows[0].phase, DisclosurePhase::Expanded);
    assert_eq!(rows[0].height, config.row_height);

    // Collapse it again.
    assert_eq!(
        system.client.toggle(newest.clone()).await.unwrap(),
        ToggleOutcome::Collapsing
    );
    tokio::time::sleep(config.disclosure_duration() * 2).await;
    let rows = system.client.rows().await.unwrap();
    assert_eq!(rows[0].phase, DisclosurePhase::Collapsed);
    assert_eq!(rows[0].height, 0.0);

    system.shutdown().await.expect("clean shutdown");
    assert_eq!(feed.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_tracking_follows_feed_until_order_disappears() {
    let feed = ChannelFeed::default();
    let mut batch = fixture();
    feed.push(batch.clone());
    let config = TimelineConfig::default();
    let system = TimelineSystem::start(Arc::new(feed.clone()), UserId::from("u1"), config.clone());
    wait_for_rows(&system, |rows| !rows.is_empty()).await;

    let tracked = OrderId::from("ord_1001");
    let overlay = system.client.track(tracked.clone()).await.unwrap();
    let reached: Vec<bool> = overlay.steps.iter().map(|s| s.reached).collect();
    assert_eq!(reached, vec![true, true, false, false, false]);

    // The feed cancels the order.
    batch[0]["status"] = json!("cancelled");
    feed.push(batch.clone());
    wait_for_rows(&system, |rows| rows.iter().any(|r| r.status_label == "Cancelled" && r.order_id == tracked)).await;
    tokio::time::sleep(config.step_duration() * 2).await;

    let overlay = system.client.overlay().await.unwrap().expect("overlay open");
    assert!(overlay.cancelled);
    assert_eq!(overlay.steps.len(), 1);
    assert_eq!(overlay.steps[0].label, "Cancelled");
    assert_eq!(overlay.steps[0].progress, 1.0);

    // The order leaves the feed: the overlay closes.
    batch.remove(0);
    feed.push(batch);
    wait_for_rows(&system, |rows| rows.len() == 3).await;
    assert!(system.client.overlay().await.unwrap().is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_feed_errors_keep_rows_and_surface_error() {
    let feed = ChannelFeed::default();
    feed.push(fixture());
    let system = TimelineSystem::start(Arc::new(feed.clone()), UserId::from("u1"), TimelineConfig::default());
    wait_for_rows(&system, |rows| rows.len() == 4).await;

    feed.push_error(FeedError::Transport("connection reset".into()));
    let mut last_error = None;
    for _ in 0..200 {
        last_error = system.client.last_error().await.unwrap();
        if last_error.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(last_error, Some(FeedError::Transport("connection reset".into())));
    assert_eq!(system.client.rows().await.unwrap().len(), 4);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_order_is_reported() {
    let feed = ChannelFeed::default();
    let system = TimelineSystem::start(Arc::new(feed), UserId::from("u1"), TimelineConfig::default());

    let missing = OrderId::from("ord_missing");
    assert_eq!(
        system.client.toggle(missing.clone()).await,
        Err(ScreenError::UnknownOrder("ord_missing".into()))
    );
    assert!(matches!(
        system.client.detail(missing).await,
        Err(ScreenError::UnknownOrder(_))
    ));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unavailable_feed_still_starts_screen() {
    let feed = ChannelFeed::default();
    feed.set_available(false);
    let system = TimelineSystem::start(Arc::new(feed), UserId::from("u1"), TimelineConfig::default());

    let mut error = None;
    for _ in 0..100 {
        error = system.client.last_error().await.unwrap();
        if error.is_some() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(matches!(error, Some(FeedError::Unavailable(_))));
    assert!(system.client.rows().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}
