use crate::config::BridgeConfig;
use crate::error::config::ConfigError;
use crate::error::connection::{ConnectionError, ConnectionStage};
use crate::error::receive::ReceiveError;
use crate::listener::source::{Connector, Notification, NotificationSource};
use crate::listener::tls::ConnectOptions;
use async_trait::async_trait;
use futures::{future, stream, Stream, StreamExt};
use log::{debug, error, info};
use postgres_native_tls::MakeTlsConnector;
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;
use tokio_postgres::{AsyncMessage, Client};

/// Notifications buffered between the connection and the receive loop. When
/// full, the connection stops being read until the loop catches up.
pub const NOTIFY_BUFFER: usize = 32;

type Incoming = Result<Notification, tokio_postgres::Error>;

/// Connects [`PostgresListener`]s using `LISTEN`/`NOTIFY`.
#[derive(Clone)]
pub struct PostgresConnector {
    config: tokio_postgres::Config,
    tls: MakeTlsConnector,
}

impl PostgresConnector {
    /// Parses the connection string and prepares TLS. Fails on settings that
    /// could never connect.
    pub fn new(database_url: &str) -> Result<Self, ConfigError> {
        let options = ConnectOptions::parse(database_url)?;
        let tls = options.tls_connector()?;

        Ok(PostgresConnector {
            config: options.config,
            tls,
        })
    }
}

#[async_trait]
impl Connector for PostgresConnector {
    type Source = PostgresListener;

    async fn connect(&self, config: &BridgeConfig) -> Result<PostgresListener, ConnectionError> {
        PostgresListener::connect(&self.config, self.tls.clone(), &config.channel).await
    }
}

/// A PostgreSQL connection subscribed to one channel.
///
/// The connection object is polled by a background task which forwards
/// notifications over a bounded channel; the client half is shared with probes.
pub struct PostgresListener {
    client: Arc<Client>,
    notifications: Receiver<Incoming>,
    driver: JoinHandle<()>,
}

impl PostgresListener {
    pub async fn connect(
        config: &tokio_postgres::Config,
        tls: MakeTlsConnector,
        channel: &str,
    ) -> Result<Self, ConnectionError> {
        let (client, mut connection) = config
            .connect(tls)
            .await
            .map_err(|e| ConnectionError::new(ConnectionStage::Connect, e))?;

        let (tx, notifications) = mpsc::channel::<Incoming>(NOTIFY_BUFFER);

        let driver = tokio::spawn(async move {
            let messages = stream::poll_fn(move |cx| connection.poll_message(cx)).filter_map(
                |message| {
                    future::ready(match message {
                        Ok(AsyncMessage::Notification(n)) => Some(Ok(Notification {
                            channel: n.channel().to_string(),
                            payload: n.payload().to_string(),
                        })),
                        Ok(AsyncMessage::Notice(notice)) => {
                            debug!("Database notice: {}", notice);
                            None
                        }
                        Ok(_) => None,
                        Err(e) => Some(Err(e)),
                    })
                },
            );
            pump(Box::pin(messages), tx).await;
        });

        let listener = PostgresListener {
            client: Arc::new(client),
            notifications,
            driver,
        };

        listener
            .client
            .simple_query("SELECT 1")
            .await
            .map_err(|e| ConnectionError::new(ConnectionStage::Ping, e))?;

        info!("Connected to PostgreSQL");

        listener
            .client
            .batch_execute(&format!("LISTEN {}", quote_identifier(channel)))
            .await
            .map_err(|e| ConnectionError::new(ConnectionStage::Listen, e))?;

        Ok(listener)
    }
}

impl Drop for PostgresListener {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

#[async_trait]
impl NotificationSource for PostgresListener {
    async fn recv(&mut self) -> Result<Option<Notification>, ReceiveError> {
        match self.notifications.recv().await {
            Some(Ok(notification)) if notification.payload.is_empty() => Ok(None),
            Some(Ok(notification)) => Ok(Some(notification)),
            Some(Err(e)) => Err(ReceiveError::Transport(Box::new(e))),
            None => Err(ReceiveError::Closed),
        }
    }

    fn probe(&self) {
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            if let Err(e) = client.simple_query("SELECT 1").await {
                debug!("Liveness probe failed: {}", e);
            }
        });
    }
}

/// Moves messages into `tx`, waiting while it is full. Stops after the first
/// error or once the receiver is gone.
async fn pump<St, E>(mut messages: St, tx: Sender<Result<Notification, E>>)
where
    St: Stream<Item = Result<Notification, E>> + Unpin,
    E: Display,
{
    while let Some(message) = messages.next().await {
        let failed = message.is_err();
        if let Err(e) = &message {
            error!("Listener error: {}", e);
        }
        if tx.send(message).await.is_err() || failed {
            break;
        }
    }
}

/// Quotes a channel name for use in `LISTEN`.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
