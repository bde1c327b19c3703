//! Runtime options for [`CampusClient`](crate::CampusClient).

use std::time::Duration;

use campusloop_common::UserId;
use campusloop_config::CampusConfig;
use campusloop_map::LayoutParams;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub identity: Option<UserId>,
    /// Minimum time between a plan being accepted and its matches showing.
    pub transition: Duration,
    pub default_errand_title: String,
    pub default_reward: f64,
    pub layout: LayoutParams,
    pub layout_seed: Option<u64>,
    pub notice_capacity: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::from_config(&CampusConfig::default())
    }
}

impl ClientOptions {
    pub fn from_config(config: &CampusConfig) -> Self {
        Self {
            identity: None,
            transition: Duration::from_millis(u64::from(config.workflow.transition_ms)),
            default_errand_title: config.errands.default_title.clone(),
            default_reward: config.errands.default_reward,
            layout: LayoutParams {
                building_count: config.layout.building_count,
                half_extent: config.layout.half_extent,
                emergency_target: config.layout.emergency_target,
            },
            layout_seed: config.layout.seed,
            notice_capacity: 16,
        }
    }

    pub fn with_identity(mut self, user: Option<UserId>) -> Self {
        self.identity = user;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.layout_seed = seed;
        }
        self
    }
}

/// Optional overrides for a new errand. Empty fields fall back to the
/// configured defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrandDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reward: Option<f64>,
}
