pub mod postgres;
pub mod source;
pub mod tls;

#[cfg(test)]
pub(crate) mod fake;

pub use postgres::{PostgresConnector, PostgresListener};
pub use source::{Connector, Notification, NotificationSource};
pub use tls::{ConnectOptions, SslMode};
