//! Live synchronization for the CampusLoop client.
//!
//! - [`channel::EventChannel`]: the single push connection, handler
//!   registry, and fixed-delay reconnect loop.
//! - [`protocol`]: envelope framing, event kinds, typed payloads.
//! - [`collection::OptimisticCollection`]: keyed, ordered mirror of server
//!   entities with idempotent reconciliation.
//! - [`emergency::EmergencyState`] and [`chat::ChatSession`]: the two
//!   broadcast-driven state holders.

pub mod channel;
pub mod chat;
pub mod collection;
pub mod emergency;
pub mod protocol;

pub use channel::{ChannelStatus, EventChannel, EventChannelConfig, HandlerId};
pub use chat::{ChatSession, HistoryTicket};
pub use collection::{InFlightChanges, Keyed, OptimisticCollection, Upsert};
pub use emergency::{EmergencySnapshot, EmergencyState};
pub use protocol::{kinds, Envelope, EventError};

/// What happened to an async result when it reached its consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Applied,
    /// The context that issued the request has moved on; result dropped.
    Stale,
}
