use crate::error::generic::PgwhResult;
use crate::event::decode;
use crate::webhook::sink::EventSink;
use log::info;

/// Turns one raw payload into exactly one delivery attempt.
///
/// A decode or delivery failure is returned to the caller, which logs it and
/// moves on. Nothing is retried.
pub struct EventForwarder<S> {
    sink: S,
}

impl<S: EventSink> EventForwarder<S> {
    pub fn new(sink: S) -> Self {
        EventForwarder { sink }
    }

    pub async fn forward(&self, payload: &str) -> PgwhResult<()> {
        let event = decode(payload)?;
        self.sink.deliver(&event).await?;

        info!("Webhook sent: {} on {}", event.operation, event.table);
        Ok(())
    }
}
