//! # Frame Client
//!
//! The cloneable handle used to talk to a [`FrameActor`](crate::FrameActor). It hides the
//! channel plumbing: callers build a request around a fresh responder and await the reply.

use crate::entity::ActorState;
use crate::error::FrameworkError;
use crate::message::Response;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `FrameActor`.
pub struct FrameClient<S: ActorState> {
    sender: mpsc::Sender<S::Request>,
}

impl<S: ActorState> Clone for FrameClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: ActorState> FrameClient<S> {
    pub fn new(sender: mpsc::Sender<S::Request>) -> Self {
        Self { sender }
    }

    /// Sends a request built around a new responder and waits for the reply.
    ///
    /// ```rust,ignore
    /// let rows = client.request(|respond_to| ScreenRequest::Rows { respond_to }).await?;
    /// ```
    pub async fn request<T, F>(&self, build: F) -> Result<T, FrameworkError>
    where
        F: FnOnce(Response<T>) -> S::Request,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Whether the actor has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
