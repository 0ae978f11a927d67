use crate::error::delivery::DeliveryError;
use crate::event::ChangeEvent;
use async_trait::async_trait;

/// Destination for decoded change events. One call is one delivery attempt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn deliver(&self, event: &ChangeEvent) -> Result<(), DeliveryError>;
}
