use crate::config::BridgeConfig;
use crate::error::connection::ConnectionError;
use crate::error::generic::PgwhError;
use crate::error::receive::ReceiveError;
use crate::forwarder::EventForwarder;
use crate::listener::source::{Connector, NotificationSource};
use crate::webhook::sink::EventSink;
use log::{debug, info, warn};
use std::time::Duration;

/// Owns one active subscription and drains it into the forwarder.
pub struct SubscriptionManager<'a, N, S> {
    source: N,
    forwarder: &'a EventForwarder<S>,
    idle_window: Duration,
}

impl<'a, N, S> SubscriptionManager<'a, N, S>
where
    N: NotificationSource,
    S: EventSink,
{
    pub fn new(source: N, forwarder: &'a EventForwarder<S>, idle_window: Duration) -> Self {
        SubscriptionManager {
            source,
            forwarder,
            idle_window,
        }
    }

    /// Connects and subscribes. Nothing is subscribed if this fails.
    pub async fn connect<C>(
        connector: &C,
        config: &BridgeConfig,
        forwarder: &'a EventForwarder<S>,
        idle_window: Duration,
    ) -> Result<Self, ConnectionError>
    where
        C: Connector<Source = N>,
    {
        let source = connector.connect(config).await?;

        info!("Listening on channel: {}", config.channel);
        info!("Waiting for notifications...");

        Ok(SubscriptionManager::new(source, forwarder, idle_window))
    }

    /// Receives and forwards notifications until the connection fails.
    ///
    /// Each notification is forwarded before the next one is read. When the
    /// idle window passes without traffic a probe is dispatched and waiting
    /// resumes. The returned error is the reason the subscription ended.
    pub async fn run(&mut self) -> ReceiveError {
        loop {
            match tokio::time::timeout(self.idle_window, self.source.recv()).await {
                Ok(Ok(Some(notification))) => {
                    debug!(
                        "Received notification on {}: {}",
                        notification.channel, notification.payload
                    );
                    match self.forwarder.forward(&notification.payload).await {
                        Ok(()) => {}
                        Err(PgwhError::DecodeError(e)) => warn!("{}", e),
                        Err(e) => warn!("Failed to send webhook: {}", e),
                    }
                }
                Ok(Ok(None)) => continue,
                Ok(Err(e)) => return e,
                Err(_) => {
                    debug!("No notifications for {:?}, probing connection", self.idle_window);
                    self.source.probe();
                }
            }
        }
    }
}
