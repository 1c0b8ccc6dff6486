//! # Mock Helpers & Testing Guide
//!
//! Testing code that talks to a frame actor does not require spawning one. A mock
//! client is a real [`FrameClient`] whose channel ends in a receiver the test holds,
//! so the test plays the actor: it receives each request, inspects it and answers
//! through the responder.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | Mock client | Real actor |
//! |---------|-------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Frames depend on the clock |
//! | **State** | No real state | Real snapshot, disclosure and tracking |
//! | **Use Case** | Testing a client wrapper or a sink | Testing the state machine or full system |
//! | **Error Injection** | Easy (reply with `Err`) | Hard (requires specific state) |
//!
//! ## Example
//!
//! ```rust
//! use timeline_actor::mock::{create_mock_client, expect_request};
//! use timeline_actor::{ActorState, Response};
//! use tokio::time::Instant;
//!
//! struct Screen;
//! #[derive(Debug)] enum ScreenRequest { Count { respond_to: Response<usize> } }
//! impl ActorState for Screen {
//!     type Request = ScreenRequest;
//!     type Context = ();
//!     fn handle(&mut self, _: ScreenRequest, _: &(), _: Instant) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver) = create_mock_client::<Screen>(4);
//!     let task = tokio::spawn(async move {
//!         client.request(|respond_to| ScreenRequest::Count { respond_to }).await
//!     });
//!
//!     let ScreenRequest::Count { respond_to } = expect_request::<Screen>(&mut receiver).await.unwrap();
//!     respond_to.send(Ok(3)).unwrap();
//!     assert_eq!(task.await.unwrap().unwrap(), 3);
//! }
//! ```
//!
//! ## Testing Time-Driven State
//!
//! States receive `now` in every hook, so animation logic is best tested by calling
//! the state directly with instants built from a fixed origin. Whole-actor tests should
//! use `#[tokio::test(start_paused = true)]`, which lets the frame interval advance
//! virtual time without real sleeping.

use crate::client::FrameClient;
use crate::entity::ActorState;
use crate::error::FrameworkError;
use std::time::Duration;
use tokio::sync::mpsc;

/// Creates a client and the receiver a test uses to stand in for the actor.
pub fn create_mock_client<S: ActorState>(
    buffer_size: usize,
) -> (FrameClient<S>, mpsc::Receiver<S::Request>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (FrameClient::new(sender), receiver)
}

/// Waits for the next request sent through a mock client.
pub async fn expect_request<S: ActorState>(
    receiver: &mut mpsc::Receiver<S::Request>,
) -> Option<S::Request> {
    receiver.recv().await
}

/// Asserts that no request arrives within `window`.
pub async fn expect_silence<S: ActorState>(
    receiver: &mut mpsc::Receiver<S::Request>,
    window: Duration,
) -> Result<(), S::Request> {
    match tokio::time::timeout(window, receiver.recv()).await {
        Ok(Some(request)) => Err(request),
        Ok(None) | Err(_) => Ok(()),
    }
}

/// A canned error for failure-injection tests.
pub fn injected_failure(message: &str) -> FrameworkError {
    FrameworkError::EntityError(Box::new(std::io::Error::other(message.to_string())))
}
