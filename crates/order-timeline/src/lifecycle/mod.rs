//! # System Lifecycle & Orchestration
//!
//! Wires the pieces of the timeline together and tears them down again.
//!
//! ## Startup
//!
//! ```text
//! TimelineSystem::start
//!   ├─ screen::new(config)          -> (FrameActor<OrderScreen>, ScreenClient)
//!   ├─ tokio::spawn(actor.run(()))
//!   └─ OrderSynchronizer::subscribe(user_id, client.clone())  -> Subscription
//! ```
//!
//! The screen is running before the subscription opens the feed, so the first
//! snapshot always has somewhere to go.
//!
//! ## Graceful Shutdown
//!
//! 1. **Unsubscribe** - cancels the feed task and waits for it; its clone of the
//!    client is dropped with it
//! 2. **Drop the client** - closes the actor's channel
//! 3. **Actor exits** - `receiver.recv()` returns `None`, `on_shutdown` clears the
//!    disclosure registry and tracking state
//! 4. **Await completion** - a panicked actor task surfaces as [`SystemError::ActorTask`]

pub mod timeline_system;

pub use timeline_system::*;
