//! # Timeline Actor
//!
//! Runtime building blocks for screens that combine a live data feed with
//! time-driven animation, all owned by a single cooperative event loop.
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`ActorState`]) - the screen's data and state machines
//! 2. **Runtime Layer** ([`FrameActor`]) - request processing and animation frames
//! 3. **Interface Layer** ([`FrameClient`], [`ActorClient`]) - type-safe communication
//!
//! Supporting pieces:
//!
//! - [`Tween`] - a sampled, cancellable scalar animation
//! - [`Registry`] - auxiliary state keyed by entity identity, pruned on list replacement
//! - [`Subscription`] - a cancellable background task with an awaitable teardown
//!
//! ## Concurrency Model
//!
//! - Each screen runs in its own Tokio task
//! - Requests and frames are processed **sequentially** within that task (no locks)
//! - Frames are only scheduled while the state reports animations in flight
//! - Feed tasks run beside the screen and hand it values through its channel
//!
//! ## Testing
//!
//! See the [`mock`] module for driving clients without an actor.

pub mod actor;
pub mod animation;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod registry;
pub mod subscription;
pub mod tracing;

// Re-export core types for convenience
pub use actor::FrameActor;
pub use animation::{Easing, Tween};
pub use client::FrameClient;
pub use client_trait::ActorClient;
pub use entity::ActorState;
pub use error::FrameworkError;
pub use message::{reply, Response};
pub use registry::Registry;
pub use subscription::Subscription;
