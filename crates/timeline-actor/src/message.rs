//! # Responses
//!
//! Requests are defined by each [`ActorState`](crate::ActorState) as its own enum; the
//! runtime only fixes the shape of the reply channel they carry.

use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel carried inside requests.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Sends a reply, ignoring callers that stopped waiting.
pub fn reply<T>(respond_to: Response<T>, result: Result<T, FrameworkError>) {
    let _ = respond_to.send(result);
}
