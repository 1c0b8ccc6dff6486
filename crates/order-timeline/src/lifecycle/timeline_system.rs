use crate::clients::ScreenClient;
use crate::config::TimelineConfig;
use crate::model::UserId;
use crate::screen;
use crate::sync::{OrderFeed, OrderSynchronizer};
use std::sync::Arc;
use thiserror::Error;
use timeline_actor::Subscription;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Screen actor task failed: {0}")]
    ActorTask(String),
}

/// The running order timeline for one user.
///
/// `TimelineSystem` is responsible for:
/// - **Lifecycle Management**: starting the screen actor and stopping it again
/// - **Dependency Wiring**: subscribing the synchronizer with the screen client as its sink
///
/// # Example
///
/// ```ignore
/// let system = TimelineSystem::start(Arc::new(feed), UserId::from("u1"), config);
/// let rows = system.client.rows().await?;
/// system.shutdown().await?;
/// ```
pub struct TimelineSystem {
    /// Client for interacting with the screen actor.
    pub client: ScreenClient,

    subscription: Subscription,
    handle: JoinHandle<()>,
}

impl TimelineSystem {
    /// Spawns the screen actor, then subscribes it to `user_id`'s orders.
    pub fn start(feed: Arc<dyn OrderFeed>, user_id: UserId, config: TimelineConfig) -> Self {
        info!(user_id = %user_id, "Starting order timeline");

        let (actor, client) = screen::new(config);
        let handle = tokio::spawn(actor.run(()));

        let synchronizer = OrderSynchronizer::new(feed);
        let subscription = synchronizer.subscribe(user_id, client.clone());

        Self {
            client,
            subscription,
            handle,
        }
    }

    /// Gracefully shuts down the timeline.
    ///
    /// 1. Unsubscribes from the feed. An update already handed to the screen is applied
    ///    first; none reaches it afterwards.
    /// 2. Drops the client, closing the actor's channel.
    /// 3. Waits for the actor task to finish.
    ///
    /// Clones of [`TimelineSystem::client`] held elsewhere keep the actor alive, so
    /// they must be dropped before calling this.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down order timeline...");
        let Self {
            client,
            mut subscription,
            handle,
        } = self;

        subscription.unsubscribe().await;
        drop(client);

        if let Err(e) = handle.await {
            error!("Screen actor task failed: {:?}", e);
            return Err(SystemError::ActorTask(e.to_string()));
        }

        info!("Order timeline shutdown complete.");
        Ok(())
    }
}
