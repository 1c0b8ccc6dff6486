//! # Framework Errors
//!
//! Common error types shared by every frame actor and its clients. Domain crates
//! wrap these in their own error enums through [`ActorClient::map_error`](crate::ActorClient::map_error).

/// Errors that can occur within the actor runtime itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
