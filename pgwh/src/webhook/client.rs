use crate::error::delivery::DeliveryError;
use crate::event::ChangeEvent;
use crate::webhook::sink::EventSink;
use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Posts change events to a single webhook URL.
///
/// The underlying `reqwest::Client` is built once and pooled across
/// deliveries; every request is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(WebhookClient {
            client,
            url: url.into(),
            timeout,
        })
    }
}

#[async_trait]
impl EventSink for WebhookClient {
    /// Any 2xx response is a success; the response body is never read.
    async fn deliver(&self, event: &ChangeEvent) -> Result<(), DeliveryError> {
        let body = event.encode().map_err(DeliveryError::Serialize)?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(Bytes::from(body))
            .send()
            .await
            .map_err(|e| DeliveryError::from_request(e, self.timeout))?;

        let status = response.status();
        debug!("Webhook responded {} for {} on {}", status, event.operation, event.table);

        if !status.is_success() {
            return Err(DeliveryError::Status(status.as_u16()));
        }

        Ok(())
    }
}
