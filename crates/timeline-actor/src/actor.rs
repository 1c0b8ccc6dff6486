//! # Frame Actor
//!
//! This module defines the `FrameActor`, the single cooperative event loop that owns a
//! screen's state. It processes client requests sequentially and, while any animation is
//! in flight, interleaves frame ticks between them.

use crate::client::FrameClient;
use crate::entity::ActorState;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// The generic actor that owns one [`ActorState`].
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state and the receiver
/// end of the channel.
///
/// **Concurrency Model**:
/// Requests and frame ticks are both handled inside the same task, one at a time. A
/// request never observes a half-applied frame and a frame never races a request, so
/// the state needs no `Mutex` or `RwLock`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `FrameActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// ```rust
/// use timeline_actor::{ActorState, FrameActor, Response};
/// use tokio::time::Instant;
///
/// #[derive(Default)]
/// struct Counter { hits: u32 }
///
/// #[derive(Debug)]
/// enum CounterRequest { Hit { respond_to: Response<u32> } }
///
/// impl ActorState for Counter {
///     type Request = CounterRequest;
///     type Context = ();
///
///     fn handle(&mut self, request: CounterRequest, _: &(), _: Instant) {
///         match request {
///             CounterRequest::Hit { respond_to } => {
///                 self.hits += 1;
///                 let _ = respond_to.send(Ok(self.hits));
///             }
///         }
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = FrameActor::new(Counter::default(), 8, std::time::Duration::from_millis(16));
///     tokio::spawn(actor.run(()));
///     let hits = client.request(|respond_to| CounterRequest::Hit { respond_to }).await.unwrap();
///     assert_eq!(hits, 1);
/// }
/// ```
pub struct FrameActor<S: ActorState> {
    receiver: mpsc::Receiver<S::Request>,
    state: S,
    frame_interval: Duration,
}

impl<S: ActorState> FrameActor<S> {
    /// Creates a new `FrameActor` and its associated `FrameClient`.
    ///
    /// # Arguments
    ///
    /// * `state` - The initial state owned by the actor.
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `frame_interval` - Period of animation frames while the state is animating.
    pub fn new(state: S, buffer_size: usize, frame_interval: Duration) -> (Self, FrameClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state,
            frame_interval,
        };
        (actor, FrameClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// The `context` argument is passed to every request handler. Dependencies created
    /// *after* the actor was instantiated can still be wired in here.
    pub async fn run(mut self, context: S::Context) {
        // Extract just the type name (e.g., "OrderScreen" instead of "order_timeline::screen::OrderScreen")
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Actor started");

        let mut frames = tokio::time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frame_count: u64 = 0;

        loop {
            let animating = self.state.is_animating();
            tokio::select! {
                msg = self.receiver.recv() => {
                    match msg {
                        Some(request) => {
                            debug!(state_type, ?request, "Request");
                            self.state.handle(request, &context, Instant::now());
                        }
                        None => break,
                    }
                }
                _ = frames.tick(), if animating => {
                    // Sample the clock rather than the tick's deadline, which may lag after idle periods.
                    frame_count += 1;
                    self.state.on_frame(Instant::now());
                }
            }
        }

        self.state.on_shutdown();
        info!(state_type, frame_count, "Shutdown");
    }
}
