//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# CampusLoop client configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
api_base_url = "http://localhost:8080/api/v1"
ws_url = "ws://localhost:8080/ws"
# request_timeout_secs = 30   # 1-300
# connect_timeout_secs = 10   # 1-120

[channel]
# Fixed delay between reconnect attempts (no exponential growth).
# reconnect_delay_ms = 3000   # 500-60000
# connect_timeout_secs = 15   # 1-120
# signal_buffer = 256         # 8-8192

[workflow]
# Minimum length of the route transition before matches are shown.
# transition_ms = 2000        # 0-10000

[errands]
# default_title = "Campus Delivery"
# default_reward = 5.0        # 0.0-1000.0

[layout]
# building_count = 20         # 2-200
# half_extent = 20.0          # 1.0-500.0
# emergency_target = 7
# seed = 42

[logging]
# level = "info"              # trace, debug, info, warn, error
"##
    .to_string()
}
