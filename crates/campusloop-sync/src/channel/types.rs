//! Channel configuration and signal types.

use std::time::Duration;

use campusloop_common::UserId;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct EventChannelConfig {
    /// Socket endpoint, e.g. `ws://localhost:8080/ws`.
    pub url: String,
    /// Fixed delay before each reconnect attempt.
    pub reconnect_delay: Duration,
    pub connect_timeout: Duration,
    /// Capacity of the connection-to-dispatcher queue.
    pub signal_buffer: usize,
}

impl EventChannelConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay: Duration::from_secs(3),
            connect_timeout: Duration::from_secs(15),
            signal_buffer: 256,
        }
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_signal_buffer(mut self, capacity: usize) -> Self {
        self.signal_buffer = capacity.max(1);
        self
    }

    /// Socket URL with the identity attached as `user_id`.
    pub fn connection_url(&self, identity: Option<&UserId>) -> String {
        match identity {
            Some(user) => {
                let sep = if self.url.contains('?') { '&' } else { '?' };
                format!(
                    "{}{sep}user_id={}",
                    self.url,
                    urlencoding::encode(user.as_str())
                )
            }
            None => self.url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// Connection lifecycle as seen by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    Connected,
    Disconnected,
}

/// Messages from the connection task to the dispatcher.
#[derive(Debug)]
pub(crate) enum ChannelSignal {
    Status(ChannelStatus),
    Frame(String),
}
