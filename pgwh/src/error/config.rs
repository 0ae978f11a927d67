use crate::error::BoxError;
use std::error::Error;
use std::fmt::{self, Display};
use std::path::PathBuf;

/// A database connection setting that can never work. Reported once at
/// startup instead of being retried.
#[derive(Debug)]
pub enum ConfigError {
    InvalidSslMode(String),
    ConnectionString(tokio_postgres::Error),
    RootCert { path: PathBuf, source: BoxError },
    Tls(native_tls::Error),
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::InvalidSslMode(_) => None,
            ConfigError::ConnectionString(e) => Some(e),
            ConfigError::RootCert { source, .. } => Some(source.as_ref()),
            ConfigError::Tls(e) => Some(e),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidSslMode(mode) => write!(
                f,
                "invalid sslmode '{}' (expected disable, prefer, require, verify-ca or verify-full)",
                mode
            ),
            ConfigError::ConnectionString(e) => write!(f, "invalid connection string: {}", e),
            ConfigError::RootCert { path, source } => {
                write!(f, "failed to load sslrootcert '{}': {}", path.display(), source)
            }
            ConfigError::Tls(e) => write!(f, "failed to set up TLS: {}", e),
        }
    }
}
