//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, shutdown and the number of frames rendered
//! - **Requests**: every request at `debug`, with its payload
//! - **Feed**: snapshot revisions, dropped records and transport errors
//! - **Client calls**: `#[instrument]` spans on the domain client methods
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run --bin order-timeline
//!
//! # Show request payloads
//! RUST_LOG=debug cargo run --bin order-timeline
//!
//! # Only the synchronizer
//! RUST_LOG=order_timeline::sync=debug cargo run --bin order-timeline
//! ```
//!
//! With `RUST_LOG=info` a short session reads:
//!
//! ```text
//! INFO Actor started state_type="OrderScreen"
//! WARN Dropping malformed order record index=3 error=Record has no orderId
//! INFO Order snapshot updated user_id=user_1 revision=1 orders=4
//! INFO Unsubscribed label="orders:user_1"
//! INFO Shutdown state_type="OrderScreen" frame_count=57
//! ```

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
