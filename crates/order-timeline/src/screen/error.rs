//! Error types for the order screen.

use thiserror::Error;

/// Errors returned by [`ScreenClient`](crate::clients::ScreenClient) calls.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScreenError {
    /// The order is not in the current snapshot.
    #[error("Unknown order: {0}")]
    UnknownOrder(String),

    /// An error occurred while communicating with the screen actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
