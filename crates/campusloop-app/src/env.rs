//! `.env` support for local development credentials.

use std::path::PathBuf;

pub const USER_ID_VAR: &str = "CAMPUSLOOP_USER_ID";
pub const TOKEN_VAR: &str = "CAMPUSLOOP_TOKEN";

/// Load `KEY=VALUE` lines from the first `.env` found. Variables already
/// set in the environment win.
pub fn load_dotenv() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Workspace root, two levels up from crates/campusloop-app/
        manifest_dir.join("..").join("..").join(".env"),
        PathBuf::from(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in parse_dotenv(&contents) {
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
            return;
        }
    }
}

/// `flag` if given, else the environment variable `var`. Empty values
/// count as absent.
pub fn flag_or_env(flag: Option<String>, var: &str) -> Option<String> {
    flag.or_else(|| std::env::var(var).ok())
        .filter(|v| !v.trim().is_empty())
}

fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            (
                key.trim(),
                value.trim().trim_matches('"').trim_matches('\''),
            )
        })
        .collect()
}
