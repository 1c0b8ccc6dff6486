//! # ActorState Trait
//!
//! The contract a piece of screen state implements to be driven by a [`FrameActor`](crate::FrameActor).
//!
//! The state owns everything a screen needs (snapshots, keyed animation registries,
//! overlays) and is only ever touched from the actor task. It gets three kinds of input:
//!
//! - **Requests** from clients, handled in arrival order by [`ActorState::handle`].
//! - **Frames**, delivered by [`ActorState::on_frame`] at the configured interval, but only
//!   while [`ActorState::is_animating`] reports in-flight animations.
//! - **Shutdown**, delivered once by [`ActorState::on_shutdown`] after the last client is gone.
//!
//! Every hook receives `now`, so the state never reads the clock itself. Tests can
//! drive a state directly with hand-built instants.

use std::fmt::Debug;
use tokio::time::Instant;

/// State managed by a [`FrameActor`](crate::FrameActor).
pub trait ActorState: Send + 'static {
    /// The request enum clients send. Variants carry their own [`Response`](crate::Response).
    type Request: Send + Debug;

    /// The runtime context injected into `run()`.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// Handle one request.
    fn handle(&mut self, request: Self::Request, ctx: &Self::Context, now: Instant);

    /// Advance animations to `now`.
    fn on_frame(&mut self, _now: Instant) {}

    /// Whether frames should keep being delivered.
    fn is_animating(&self) -> bool {
        false
    }

    /// Called once when the actor loop exits.
    fn on_shutdown(&mut self) {}
}
