//! Client behaviour: submission timing, errand defaults, layout, logging.

use serde::{Deserialize, Serialize};

/// Plan submission timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Minimum duration of the transition effect before matches are revealed.
    pub transition_ms: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            transition_ms: 2000,
        }
    }
}

/// Defaults applied to errands posted from the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrandDefaults {
    pub default_title: String,
    pub default_reward: f64,
}

impl Default for ErrandDefaults {
    fn default() -> Self {
        Self {
            default_title: "Campus Delivery".into(),
            default_reward: 5.0,
        }
    }
}

/// Generated building layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub building_count: u32,
    /// Buildings are placed inside `(-half_extent, half_extent)` on both axes.
    pub half_extent: f64,
    /// Building flagged as the emergency beacon target.
    pub emergency_target: u32,
    /// Fixed seed for reproducible layouts. Random when unset.
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            building_count: 20,
            half_extent: 20.0,
            emergency_target: 7,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}
