use crate::error::decode::DecodeError;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// A row change published by the database trigger.
///
/// `data` and `old_data` are kept as raw JSON text so they reach the webhook
/// exactly as the trigger produced them.
///
/// Stricter than a zero-value decode: `operation`, `timestamp`, `table` and
/// `data` must all be present, and an explicit `"old_data": null` is dropped
/// from the forwarded body rather than echoed back as `null`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ChangeEvent {
    pub operation: String,
    pub timestamp: String,
    pub table: String,
    pub data: Box<RawValue>,
    /// Absent for inserts. A JSON `null` is read as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_data: Option<Box<RawValue>>,
}

impl ChangeEvent {
    /// Serializes the event to its webhook body.
    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Parses a notification payload into a [`ChangeEvent`].
pub fn decode(payload: &str) -> Result<ChangeEvent, DecodeError> {
    Ok(serde_json::from_str(payload)?)
}
