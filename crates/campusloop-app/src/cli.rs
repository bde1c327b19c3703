use std::path::PathBuf;

use clap::Parser;

/// CampusLoop: live campus map client for route planning and errands.
#[derive(Parser, Debug)]
#[command(name = "campusloop", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Signed-in user id. Falls back to CAMPUSLOOP_USER_ID.
    #[arg(long)]
    pub user_id: Option<String>,

    /// Bearer token for the API. Falls back to CAMPUSLOOP_TOKEN.
    #[arg(long)]
    pub token: Option<String>,

    /// Layout seed, overriding the config.
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = Args::parse_from([
            "campusloop",
            "--config",
            "/tmp/c.toml",
            "--log-level",
            "debug",
            "--user-id",
            "u-42",
            "--token",
            "abc",
            "--seed",
            "9",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.user_id.as_deref(), Some("u-42"));
        assert_eq!(args.token.as_deref(), Some("abc"));
        assert_eq!(args.seed, Some(9));
    }

    #[test]
    fn flags_are_optional() {
        let args = Args::parse_from(["campusloop"]);
        assert!(args.config.is_none());
        assert!(args.seed.is_none());
    }
}
