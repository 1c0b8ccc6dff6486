//! Error types for the order feed.

use thiserror::Error;

/// Transport-level failures. Surfaced alongside the last good snapshot, never instead of it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeedError {
    /// The feed could not be opened.
    #[error("Feed unavailable: {0}")]
    Unavailable(String),

    /// The remote side reported an error mid-stream.
    #[error("Feed transport error: {0}")]
    Transport(String),

    /// The subscriber fell behind and batches were skipped.
    #[error("Feed lagged, {0} batches skipped")]
    Lagged(u64),

    /// The feed ended the stream; no further batches will arrive.
    #[error("Feed closed")]
    Closed,
}
