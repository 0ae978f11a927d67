use pgwh::error::ConnectionStage;
use pgwh::{BridgeConfig, Connector, PostgresConnector};
use std::error::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const CERT: &[u8] = include_bytes!("fixtures/server.crt");
const KEY: &[u8] = include_bytes!("fixtures/server.key");
const ROOT_CERT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/server.crt");
const ACCEPTED: &str = "handshake accepted";

/// Backend message rejecting the startup packet.
fn error_response(message: &str) -> Vec<u8> {
    let mut fields = vec![];
    for (code, value) in [(b'S', "FATAL"), (b'V', "FATAL"), (b'C', "28000"), (b'M', message)] {
        fields.push(code);
        fields.extend_from_slice(value.as_bytes());
        fields.push(0);
    }
    fields.push(0);

    let mut frame = vec![b'E'];
    frame.extend_from_slice(&((fields.len() + 4) as u32).to_be_bytes());
    frame.extend_from_slice(&fields);
    frame
}

/// Answers every SSLRequest with `tls` ('S' or 'N'). After a TLS handshake
/// it reads the startup packet and fails authentication with [`ACCEPTED`].
async fn start_server(tls: u8) -> u16 {
    let identity = native_tls::Identity::from_pkcs8(CERT, KEY).unwrap();
    let acceptor: tokio_native_tls::TlsAcceptor =
        native_tls::TlsAcceptor::new(identity).unwrap().into();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = listener.accept().await.unwrap();
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                let mut ssl_request = [0u8; 8];
                if socket.read_exact(&mut ssl_request).await.is_err() {
                    return;
                }
                socket.write_all(&[tls]).await.unwrap();
                if tls != b'S' {
                    return;
                }

                let Ok(mut stream) = acceptor.accept(socket).await else {
                    return;
                };
                let mut len = [0u8; 4];
                if stream.read_exact(&mut len).await.is_err() {
                    return;
                }
                let mut startup = vec![0u8; u32::from_be_bytes(len) as usize - 4];
                if stream.read_exact(&mut startup).await.is_err() {
                    return;
                }
                let _ = stream.write_all(&error_response(ACCEPTED)).await;
                let _ = stream.flush().await;
            });
        }
    });

    port
}

fn error_chain(err: &dyn Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        chain.push_str(": ");
        chain.push_str(&e.to_string());
        source = e.source();
    }
    chain
}

async fn connect_error(database_url: String) -> (ConnectionStage, String) {
    let config = BridgeConfig::new(
        database_url,
        "http://localhost:1880/authentik-webhook".to_string(),
        "authentik_changes".to_string(),
    );
    let connector = PostgresConnector::new(&config.database_url).unwrap_or_else(|e| panic!("{}", e));
    let err = connector.connect(&config).await.err().unwrap();
    (err.stage, error_chain(&err))
}

#[tokio::test]
async fn test_require_completes_handshake_with_self_signed_cert() {
    let port = start_server(b'S').await;
    let (stage, chain) =
        connect_error(format!("postgres://postgres@127.0.0.1:{}/postgres?sslmode=require", port)).await;

    assert_eq!(stage, ConnectionStage::Connect);
    assert!(chain.contains(ACCEPTED), "{}", chain);
}

#[tokio::test]
async fn test_require_fails_when_server_refuses_tls() {
    let port = start_server(b'N').await;
    let (_, chain) =
        connect_error(format!("postgres://postgres@127.0.0.1:{}/postgres?sslmode=require", port)).await;

    assert!(!chain.contains(ACCEPTED), "{}", chain);
}

#[tokio::test]
async fn test_verify_ca_accepts_trusted_cert_for_other_host() {
    let port = start_server(b'S').await;
    let (_, chain) = connect_error(format!(
        "postgres://postgres@127.0.0.1:{}/postgres?sslmode=verify-ca&sslrootcert={}",
        port, ROOT_CERT
    ))
    .await;

    assert!(chain.contains(ACCEPTED), "{}", chain);
}

#[tokio::test]
async fn test_verify_full_checks_host_name() {
    let port = start_server(b'S').await;
    let (_, chain) = connect_error(format!(
        "postgres://postgres@127.0.0.1:{}/postgres?sslmode=verify-full&sslrootcert={}",
        port, ROOT_CERT
    ))
    .await;
    assert!(!chain.contains(ACCEPTED), "{}", chain);

    let port = start_server(b'S').await;
    let (_, chain) = connect_error(format!(
        "postgres://postgres@pgwh.test:{}/postgres?hostaddr=127.0.0.1&sslmode=verify-full&sslrootcert={}",
        port, ROOT_CERT
    ))
    .await;
    assert!(chain.contains(ACCEPTED), "{}", chain);
}

#[tokio::test]
async fn test_verify_full_rejects_untrusted_cert() {
    let port = start_server(b'S').await;
    let (_, chain) = connect_error(format!(
        "postgres://postgres@127.0.0.1:{}/postgres?sslmode=verify-full",
        port
    ))
    .await;

    assert!(!chain.contains(ACCEPTED), "{}", chain);
}

#[test]
fn test_invalid_sslmode_is_rejected_before_connecting() {
    let err = PostgresConnector::new("postgres://postgres@localhost/postgres?sslmode=verify")
        .err()
        .unwrap();
    assert!(err.to_string().starts_with("invalid sslmode 'verify'"));
}
