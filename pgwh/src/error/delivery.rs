use std::error::Error;
use std::fmt::{self, Display};
use std::time::Duration;

/// A single webhook delivery attempt that did not succeed.
#[derive(Debug)]
pub enum DeliveryError {
    /// The event could not be re-serialized.
    Serialize(serde_json::Error),
    /// No response within the delivery timeout.
    Timeout(Duration),
    /// The endpoint could not be connected to (refused, DNS failure).
    Connect(reqwest::Error),
    /// Any other transport-level failure.
    Transport(reqwest::Error),
    /// The endpoint answered outside the 2xx range.
    Status(u16),
}

impl DeliveryError {
    pub(crate) fn from_request(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            DeliveryError::Timeout(timeout)
        } else if error.is_connect() {
            DeliveryError::Connect(error)
        } else {
            DeliveryError::Transport(error)
        }
    }
}

impl Error for DeliveryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeliveryError::Serialize(e) => Some(e),
            DeliveryError::Connect(e) | DeliveryError::Transport(e) => Some(e),
            DeliveryError::Timeout(_) | DeliveryError::Status(_) => None,
        }
    }
}

impl Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeliveryError::Serialize(e) => write!(f, "failed to marshal event: {}", e),
            DeliveryError::Timeout(t) => write!(f, "failed to post: timed out after {:?}", t),
            DeliveryError::Connect(e) => write!(f, "failed to post: connection failed: {}", e),
            DeliveryError::Transport(e) => write!(f, "failed to post: {}", e),
            DeliveryError::Status(code) => write!(f, "bad status code: {}", code),
        }
    }
}
