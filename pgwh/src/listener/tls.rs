use crate::error::config::ConfigError;
use percent_encoding::percent_decode_str;
use postgres_native_tls::MakeTlsConnector;
use std::path::PathBuf;
use std::str::FromStr;
use tokio_postgres::config::SslMode as DriverSslMode;

/// libpq `sslmode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    Disable,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl FromStr for SslMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(ConfigError::InvalidSslMode(other.to_string())),
        }
    }
}

impl SslMode {
    fn driver_mode(self) -> DriverSslMode {
        match self {
            SslMode::Disable => DriverSslMode::Disable,
            SslMode::Prefer => DriverSslMode::Prefer,
            SslMode::Require | SslMode::VerifyCa | SslMode::VerifyFull => DriverSslMode::Require,
        }
    }

    /// Returns whether the certificate chain and the host name are checked.
    /// As in libpq, a root certificate upgrades `require` to chain checking.
    fn verification(self, has_root_cert: bool) -> (bool, bool) {
        match self {
            SslMode::Disable | SslMode::Prefer | SslMode::Require => (has_root_cert, false),
            SslMode::VerifyCa => (true, false),
            SslMode::VerifyFull => (true, true),
        }
    }
}

/// A parsed connection string plus the TLS settings the driver does not
/// understand on its own (`verify-ca`, `verify-full`, `sslrootcert`).
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub config: tokio_postgres::Config,
    pub ssl_mode: SslMode,
    pub root_cert: Option<PathBuf>,
}

impl ConnectOptions {
    /// Accepts both `postgres://` URLs and `key=value` strings.
    pub fn parse(connection_string: &str) -> Result<Self, ConfigError> {
        let (rest, sslmode, root_cert) = split_tls_params(connection_string);

        let ssl_mode = match sslmode {
            Some(mode) => mode.parse()?,
            None => SslMode::Prefer,
        };

        let mut config: tokio_postgres::Config =
            rest.parse().map_err(ConfigError::ConnectionString)?;
        config.ssl_mode(ssl_mode.driver_mode());

        Ok(ConnectOptions {
            config,
            ssl_mode,
            root_cert: root_cert.map(PathBuf::from),
        })
    }

    pub fn tls_connector(&self) -> Result<MakeTlsConnector, ConfigError> {
        let mut builder = native_tls::TlsConnector::builder();

        if let Some(path) = &self.root_cert {
            let root_cert_error = |source| ConfigError::RootCert {
                path: path.clone(),
                source,
            };
            let pem = std::fs::read(path).map_err(|e| root_cert_error(e.into()))?;
            let cert = native_tls::Certificate::from_pem(&pem)
                .map_err(|e| root_cert_error(e.into()))?;
            builder.add_root_certificate(cert);
        }

        let (verify_chain, verify_name) = self.ssl_mode.verification(self.root_cert.is_some());
        builder.danger_accept_invalid_certs(!verify_chain);
        builder.danger_accept_invalid_hostnames(!verify_name);

        let connector = builder.build().map_err(ConfigError::Tls)?;
        Ok(MakeTlsConnector::new(connector))
    }
}

const SSLMODE: &str = "sslmode";
const SSLROOTCERT: &str = "sslrootcert";

// Removes sslmode/sslrootcert and returns them separately from the rest.
fn split_tls_params(connection_string: &str) -> (String, Option<String>, Option<String>) {
    let mut sslmode = None;
    let mut root_cert = None;

    let is_url = connection_string.starts_with("postgres://")
        || connection_string.starts_with("postgresql://");

    if is_url {
        let (base, query) = match connection_string.split_once('?') {
            Some((base, query)) => (base, query),
            None => return (connection_string.to_string(), None, None),
        };

        let mut kept = vec![];
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = percent_decode_str(value).decode_utf8_lossy().into_owned();
            match key {
                SSLMODE => sslmode = Some(value),
                SSLROOTCERT => root_cert = Some(value),
                _ => kept.push(pair),
            }
        }

        let rest = if kept.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, kept.join("&"))
        };
        return (rest, sslmode, root_cert);
    }

    let mut kept = vec![];
    for token in connection_string.split_whitespace() {
        match token.split_once('=') {
            Some((SSLMODE, value)) => sslmode = Some(value.trim_matches('\'').to_string()),
            Some((SSLROOTCERT, value)) => root_cert = Some(value.trim_matches('\'').to_string()),
            _ => kept.push(token),
        }
    }
    (kept.join(" "), sslmode, root_cert)
}
