//! Server endpoints and live-channel configuration.

use serde::{Deserialize, Serialize};

/// REST endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the versioned REST API (`.../api/v1`).
    pub api_base_url: String,
    /// Socket endpoint for live events.
    pub ws_url: String,
    pub request_timeout_secs: u32,
    pub connect_timeout_secs: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api/v1".into(),
            ws_url: "ws://localhost:8080/ws".into(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Live event channel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Fixed delay between reconnect attempts.
    pub reconnect_delay_ms: u32,
    /// Handshake timeout per attempt.
    pub connect_timeout_secs: u32,
    /// Capacity of the connection-to-dispatcher signal queue.
    pub signal_buffer: u32,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            reconnect_delay_ms: 3000,
            connect_timeout_secs: 15,
            signal_buffer: 256,
        }
    }
}
