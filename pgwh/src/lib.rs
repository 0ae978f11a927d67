//! Bridges PostgreSQL `LISTEN`/`NOTIFY` change events to an HTTP webhook.
//!
//! A [`Supervisor`] keeps one [`SubscriptionManager`] alive at a time. Each
//! received payload is decoded into a [`ChangeEvent`] and posted once by the
//! [`EventForwarder`]; per-event failures are logged and dropped, while
//! connection failures restart the subscription after a fixed delay.

pub mod config;
pub mod error;
pub mod event;
pub mod forwarder;
pub mod listener;
pub mod subscription;
pub mod supervisor;
pub mod webhook;

pub use config::{BridgeConfig, DatabaseParams, Timings};
pub use error::{PgwhError, PgwhResult};
pub use event::{decode, ChangeEvent};
pub use forwarder::EventForwarder;
pub use listener::{Connector, Notification, NotificationSource, PostgresConnector};
pub use subscription::SubscriptionManager;
pub use supervisor::Supervisor;
pub use webhook::{EventSink, WebhookClient};
