//! # ActorClient Trait
//!
//! Provides a common interface for screen-specific clients: access to the inner
//! [`FrameClient`] plus one place that maps framework errors into the domain error type.
use crate::{ActorState, FrameClient, FrameworkError, Response};
use async_trait::async_trait;

/// Trait for domain clients wrapping a [`FrameClient`].
///
/// # Example
///
/// ```rust
/// use timeline_actor::{ActorClient, ActorState, FrameClient, FrameworkError, Response};
/// use tokio::time::Instant;
///
/// struct Clock;
/// #[derive(Debug)] enum ClockRequest { Now { respond_to: Response<u64> } }
/// impl ActorState for Clock {
///     type Request = ClockRequest;
///     type Context = ();
///     fn handle(&mut self, request: ClockRequest, _: &(), _: Instant) {
///         let ClockRequest::Now { respond_to } = request;
///         let _ = respond_to.send(Ok(42));
///     }
/// }
///
/// #[derive(Debug)] struct ClockError(String);
///
/// struct ClockClient { inner: FrameClient<Clock> }
///
/// impl ActorClient<Clock> for ClockClient {
///     type Error = ClockError;
///     fn inner(&self) -> &FrameClient<Clock> { &self.inner }
///     fn map_error(e: FrameworkError) -> ClockError { ClockError(e.to_string()) }
/// }
///
/// async fn usage(client: ClockClient) {
///     // call() is provided automatically
///     let _ = client.call(|respond_to| ClockRequest::Now { respond_to }).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<S: ActorState>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send;

    /// Access the inner generic client.
    fn inner(&self) -> &FrameClient<S>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Send a request and map any failure into [`Self::Error`].
    async fn call<T, F>(&self, build: F) -> Result<T, Self::Error>
    where
        T: Send + 'static,
        F: FnOnce(Response<T>) -> S::Request + Send,
    {
        tracing::debug!("Sending request");
        self.inner().request(build).await.map_err(Self::map_error)
    }
}
