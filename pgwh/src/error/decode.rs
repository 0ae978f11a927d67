use std::error::Error;
use std::fmt::{self, Display};

/// A notification payload that is not a valid change event.
#[derive(Debug)]
pub struct DecodeError {
    pub source: serde_json::Error,
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "failed to parse notification: {}", self.source)
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(error: serde_json::Error) -> Self {
        DecodeError { source: error }
    }
}
