//! Workflow, errand, layout, and logging validation.

use super::helpers::{validate_range, validate_range_f64};
use crate::schema::CampusConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub(crate) fn validate_workflow(errors: &mut Vec<String>, config: &CampusConfig) {
    validate_range(
        errors,
        "workflow.transition_ms",
        config.workflow.transition_ms,
        0,
        10_000,
    );
}

pub(crate) fn validate_errands(errors: &mut Vec<String>, config: &CampusConfig) {
    if config.errands.default_title.trim().is_empty() {
        errors.push("errands.default_title must not be empty".into());
    }
    validate_range_f64(
        errors,
        "errands.default_reward",
        config.errands.default_reward,
        0.0,
        1000.0,
    );
}

pub(crate) fn validate_layout(errors: &mut Vec<String>, config: &CampusConfig) {
    let layout = &config.layout;
    validate_range(errors, "layout.building_count", layout.building_count, 2, 200);
    validate_range_f64(errors, "layout.half_extent", layout.half_extent, 1.0, 500.0);
    if layout.emergency_target >= layout.building_count {
        errors.push(format!(
            "layout.emergency_target = {} must be below layout.building_count = {}",
            layout.emergency_target, layout.building_count
        ));
    }
}

pub(crate) fn validate_logging(errors: &mut Vec<String>, config: &CampusConfig) {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(format!(
            "logging.level = '{}' must be one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }
}
