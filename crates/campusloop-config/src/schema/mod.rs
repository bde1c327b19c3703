//! Configuration schema types for the CampusLoop client.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod client;
mod network;

pub use client::*;
pub use network::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampusConfig {
    pub server: ServerConfig,
    pub channel: ChannelConfig,
    pub workflow: WorkflowConfig,
    pub errands: ErrandDefaults,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
}
