pub mod config;
pub mod connection;
pub mod decode;
pub mod delivery;
pub mod generic;
pub mod receive;

pub use config::ConfigError;
pub use connection::{ConnectionError, ConnectionStage};
pub use decode::DecodeError;
pub use delivery::DeliveryError;
pub use generic::{PgwhError, PgwhResult};
pub use receive::ReceiveError;

/// Underlying cause carried by connection-level errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
