//! # Order Timeline Demo
//!
//! Replays a fixture file through an in-memory feed and walks the timeline through a
//! typical session:
//! 1.  Starting the [`TimelineSystem`] for a user.
//! 2.  Expanding the newest order.
//! 3.  Tracking it while the feed moves it to `shipped`.
//! 4.  Printing the navigation payload for its detail screen.

use anyhow::{Context, Result};
use clap::Parser;
use order_timeline::config::{load_config, TimelineConfig};
use order_timeline::lifecycle::TimelineSystem;
use order_timeline::model::UserId;
use order_timeline::presentation::OrderRow;
use order_timeline::sync::ChannelFeed;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use timeline_actor::tracing::setup_tracing;
use tracing::{info, warn, Instrument};

#[derive(Debug, Parser)]
#[command(about = "Replay an order fixture through the animated order timeline")]
struct Args {
    /// TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of raw order records.
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/orders.json"))]
    fixture: PathBuf,

    #[arg(long, default_value = "demo-user")]
    user: String,
}

fn log_rows(rows: &[OrderRow]) {
    for row in rows {
        info!(
            order_id = %row.order_id,
            number = %row.order_number,
            status = row.status_label,
            date = %row.order_date,
            total = %row.total,
            phase = ?row.phase,
            height = row.height,
            "Row"
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TimelineConfig::default(),
    };
    let settle = config.disclosure_duration().max(config.step_duration()) + Duration::from_millis(50);

    let text = std::fs::read_to_string(&args.fixture)
        .with_context(|| format!("reading fixture {}", args.fixture.display()))?;
    let mut batch: Vec<Value> =
        serde_json::from_str(&text).context("fixture must be a JSON array of order records")?;

    let feed = ChannelFeed::default();
    feed.push(batch.clone());

    let system = TimelineSystem::start(Arc::new(feed.clone()), UserId(args.user), config);

    let mut rows = Vec::new();
    for _ in 0..100 {
        rows = system.client.rows().await?;
        if !rows.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    info!(count = rows.len(), "Initial snapshot");
    log_rows(&rows);

    let Some(newest) = rows.first().map(|row| row.order_id.clone()) else {
        warn!("Fixture produced no orders");
        system.shutdown().await?;
        return Ok(());
    };

    let span = tracing::info_span!("disclosure", order_id = %newest);
    async {
        let outcome = system.client.toggle(newest.clone()).await?;
        info!(?outcome, "Toggled");
        tokio::time::sleep(settle).await;
        log_rows(&system.client.rows().await?);
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("tracking", order_id = %newest);
    async {
        let overlay = system.client.track(newest.clone()).await?;
        info!(steps = overlay.steps.len(), "Tracking opened");

        for record in batch.iter_mut() {
            if record.get("orderId").and_then(Value::as_str) == Some(newest.0.as_str()) {
                record["status"] = Value::from("shipped");
            }
        }
        feed.push(batch.clone());
        tokio::time::sleep(settle).await;

        if let Some(overlay) = system.client.overlay().await? {
            for step in &overlay.steps {
                info!(step = step.label, progress = step.progress, reached = step.reached, "Step");
            }
        }
        system.client.close_tracking().await?;
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    let detail = system.client.detail(newest).await?;
    println!("{}", serde_json::to_string_pretty(&detail)?);

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
