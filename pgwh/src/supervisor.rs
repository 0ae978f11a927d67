use crate::config::{BridgeConfig, Timings};
use crate::error::generic::PgwhError;
use crate::forwarder::EventForwarder;
use crate::listener::source::Connector;
use crate::subscription::SubscriptionManager;
use crate::webhook::sink::EventSink;
use log::error;

/// Restarts the connect-and-run cycle after every failure, forever, with a
/// fixed delay in between.
pub struct Supervisor<C, S> {
    connector: C,
    forwarder: EventForwarder<S>,
    config: BridgeConfig,
    timings: Timings,
}

impl<C, S> Supervisor<C, S>
where
    C: Connector,
    S: EventSink,
{
    pub fn new(connector: C, sink: S, config: BridgeConfig, timings: Timings) -> Self {
        Supervisor {
            connector,
            forwarder: EventForwarder::new(sink),
            config,
            timings,
        }
    }

    /// Runs a single subscription until it fails and returns the cause.
    pub async fn session(&self) -> PgwhError {
        let manager = SubscriptionManager::connect(
            &self.connector,
            &self.config,
            &self.forwarder,
            self.timings.idle_window,
        )
        .await;

        match manager {
            Ok(mut manager) => manager.run().await.into(),
            Err(e) => e.into(),
        }
    }

    /// Never returns.
    pub async fn run(&self) {
        loop {
            let err = self.session().await;
            error!(
                "Error: {}. Reconnecting in {} seconds...",
                err,
                self.timings.reconnect_delay.as_secs()
            );
            tokio::time::sleep(self.timings.reconnect_delay).await;
        }
    }
}
