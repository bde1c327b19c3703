//! Server endpoint and channel validation.

use super::helpers::{validate_range, validate_url_scheme};
use crate::schema::CampusConfig;

pub(crate) fn validate_server(errors: &mut Vec<String>, config: &CampusConfig) {
    let server = &config.server;
    validate_url_scheme(errors, "server.api_base_url", &server.api_base_url, &["http", "https"]);
    validate_url_scheme(errors, "server.ws_url", &server.ws_url, &["ws", "wss"]);
    validate_range(
        errors,
        "server.request_timeout_secs",
        server.request_timeout_secs,
        1,
        300,
    );
    validate_range(
        errors,
        "server.connect_timeout_secs",
        server.connect_timeout_secs,
        1,
        120,
    );
}

pub(crate) fn validate_channel(errors: &mut Vec<String>, config: &CampusConfig) {
    let channel = &config.channel;
    validate_range(
        errors,
        "channel.reconnect_delay_ms",
        channel.reconnect_delay_ms,
        500,
        60_000,
    );
    validate_range(
        errors,
        "channel.connect_timeout_secs",
        channel.connect_timeout_secs,
        1,
        120,
    );
    validate_range(errors, "channel.signal_buffer", channel.signal_buffer, 8, 8192);
}
