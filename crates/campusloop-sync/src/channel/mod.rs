//! The live event channel: one socket, handlers keyed by event kind,
//! fixed-delay reconnect.

mod client;
mod connection;
mod registry;
mod types;

#[cfg(test)]
mod tests;

pub use client::EventChannel;
pub use registry::HandlerId;
pub use types::{ChannelStatus, EventChannelConfig};
