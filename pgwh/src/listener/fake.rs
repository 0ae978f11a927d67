use crate::config::BridgeConfig;
use crate::error::connection::{ConnectionError, ConnectionStage};
use crate::error::receive::ReceiveError;
use crate::listener::source::{Connector, Notification, NotificationSource};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;

pub(crate) type Feed = UnboundedSender<Result<Option<Notification>, ReceiveError>>;

/// In-memory source fed through a channel. Reports `Closed` once every
/// sender is dropped.
pub(crate) struct FakeSource {
    rx: UnboundedReceiver<Result<Option<Notification>, ReceiveError>>,
    pub(crate) probes: Arc<AtomicUsize>,
}

impl FakeSource {
    pub(crate) fn new() -> (Feed, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = FakeSource {
            rx,
            probes: Arc::new(AtomicUsize::new(0)),
        };
        (tx, source)
    }
}

pub(crate) fn notification(payload: &str) -> Notification {
    Notification {
        channel: "authentik_changes".to_string(),
        payload: payload.to_string(),
    }
}

#[async_trait]
impl NotificationSource for FakeSource {
    async fn recv(&mut self) -> Result<Option<Notification>, ReceiveError> {
        match self.rx.recv().await {
            Some(item) => item,
            None => Err(ReceiveError::Closed),
        }
    }

    fn probe(&self) {
        self.probes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Hands out scripted connection results in order, failing once exhausted.
pub(crate) struct FakeConnector {
    results: Mutex<VecDeque<Result<FakeSource, ConnectionError>>>,
    pub(crate) attempts: Arc<Mutex<Vec<Instant>>>,
}

impl FakeConnector {
    pub(crate) fn new(results: Vec<Result<FakeSource, ConnectionError>>) -> Self {
        FakeConnector {
            results: Mutex::new(results.into()),
            attempts: Arc::new(Mutex::new(vec![])),
        }
    }
}

#[async_trait]
impl Connector for FakeConnector {
    type Source = FakeSource;

    async fn connect(&self, _config: &BridgeConfig) -> Result<FakeSource, ConnectionError> {
        self.attempts.lock().unwrap().push(Instant::now());
        self.results.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ConnectionError::new(
                ConnectionStage::Connect,
                "no more scripted connections",
            ))
        })
    }
}
