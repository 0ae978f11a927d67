use crate::error::connection::ConnectionError;
use crate::error::decode::DecodeError;
use crate::error::delivery::DeliveryError;
use crate::error::receive::ReceiveError;
use std::error::Error;
use std::fmt::{self, Display};

pub type PgwhResult<T> = Result<T, PgwhError>;

#[derive(Debug)]
pub enum PgwhError {
    ConnectionError(ConnectionError),
    ReceiveError(ReceiveError),
    DecodeError(DecodeError),
    DeliveryError(DeliveryError),
}

impl Display for PgwhError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PgwhError::ConnectionError(e) => e.fmt(f),
            PgwhError::ReceiveError(e) => e.fmt(f),
            PgwhError::DecodeError(e) => e.fmt(f),
            PgwhError::DeliveryError(e) => e.fmt(f),
        }
    }
}

impl Error for PgwhError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PgwhError::ConnectionError(e) => Some(e),
            PgwhError::ReceiveError(e) => Some(e),
            PgwhError::DecodeError(e) => Some(e),
            PgwhError::DeliveryError(e) => Some(e),
        }
    }
}

impl From<ConnectionError> for PgwhError {
    fn from(error: ConnectionError) -> Self {
        PgwhError::ConnectionError(error)
    }
}

impl From<ReceiveError> for PgwhError {
    fn from(error: ReceiveError) -> Self {
        PgwhError::ReceiveError(error)
    }
}

impl From<DecodeError> for PgwhError {
    fn from(error: DecodeError) -> Self {
        PgwhError::DecodeError(error)
    }
}

impl From<DeliveryError> for PgwhError {
    fn from(error: DeliveryError) -> Self {
        PgwhError::DeliveryError(error)
    }
}
