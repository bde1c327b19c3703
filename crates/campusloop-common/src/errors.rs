use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Top-level error for the client process.
///
/// Nothing below the binary treats these as fatal; they bubble up only so
/// the console can print them before the next prompt.
#[derive(Debug, thiserror::Error)]
pub enum CampusError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("channel error: {0}")]
    Channel(String),

    #[error("workflow error: {0}")]
    Workflow(String),

    #[error("{0}")]
    Other(String),
}
