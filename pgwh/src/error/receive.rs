use crate::error::BoxError;
use std::error::Error;
use std::fmt::{self, Display};

/// Failure while waiting for or reading a notification.
#[derive(Debug)]
pub enum ReceiveError {
    /// The notification stream ended; the connection is gone.
    Closed,
    /// The connection reported an error.
    Transport(BoxError),
}

impl Error for ReceiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReceiveError::Closed => None,
            ReceiveError::Transport(e) => Some(e.as_ref()),
        }
    }
}

impl Display for ReceiveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReceiveError::Closed => write!(f, "notification stream closed"),
            ReceiveError::Transport(e) => write!(f, "connection error: {}", e),
        }
    }
}
