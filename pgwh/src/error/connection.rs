use crate::error::BoxError;
use std::error::Error;
use std::fmt::{self, Display};

/// The step of connection setup that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStage {
    Connect,
    Ping,
    Listen,
}

impl Display for ConnectionStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stage = match self {
            ConnectionStage::Connect => "connect",
            ConnectionStage::Ping => "ping",
            ConnectionStage::Listen => "start listener",
        };
        f.write_str(stage)
    }
}

/// The database could not be reached or the subscription could not be
/// established. No subscription is active once this is returned.
#[derive(Debug)]
pub struct ConnectionError {
    pub stage: ConnectionStage,
    pub source: BoxError,
}

impl ConnectionError {
    pub fn new(stage: ConnectionStage, source: impl Into<BoxError>) -> Self {
        ConnectionError {
            stage,
            source: source.into(),
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "failed to {}: {}", self.stage, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_stage() {
        let err = ConnectionError::new(ConnectionStage::Listen, "permission denied");
        assert_eq!(
            err.to_string(),
            "failed to start listener: permission denied"
        );

        let err = ConnectionError::new(ConnectionStage::Ping, "timed out");
        assert_eq!(err.to_string(), "failed to ping: timed out");
    }
}
