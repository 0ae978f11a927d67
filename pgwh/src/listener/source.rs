use crate::config::BridgeConfig;
use crate::error::connection::ConnectionError;
use crate::error::receive::ReceiveError;
use async_trait::async_trait;

/// One message delivered on a subscribed channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub channel: String,
    pub payload: String,
}

/// A live subscription to one channel.
#[async_trait]
pub trait NotificationSource: Send {
    /// Waits for the next notification.
    ///
    /// `Ok(None)` is an envelope without payload. Must be cancel-safe: the
    /// receive loop drops this future when the idle window expires.
    async fn recv(&mut self) -> Result<Option<Notification>, ReceiveError>;

    /// Starts a liveness probe in the background and returns immediately.
    fn probe(&self);
}

/// Opens subscriptions. Called again by the supervisor after every failure.
#[async_trait]
pub trait Connector: Send + Sync {
    type Source: NotificationSource;

    async fn connect(&self, config: &BridgeConfig) -> Result<Self::Source, ConnectionError>;
}
