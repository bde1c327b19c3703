//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod client;
mod helpers;
mod network;


use crate::schema::CampusConfig;
use campusloop_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &CampusConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    network::validate_server(&mut errors, config);
    network::validate_channel(&mut errors, config);
    client::validate_workflow(&mut errors, config);
    client::validate_errands(&mut errors, config);
    client::validate_layout(&mut errors, config);
    client::validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
