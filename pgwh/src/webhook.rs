pub mod client;
pub mod sink;

pub use client::WebhookClient;
pub use sink::EventSink;
