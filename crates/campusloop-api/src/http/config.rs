//! HTTP client configuration.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    /// Versioned API root, e.g. `http://localhost:8080/api/v1`.
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeouts(mut self, request: Duration, connect: Duration) -> Self {
        self.request_timeout = request;
        self.connect_timeout = connect;
        self
    }

    /// URL for an API path (`path` starts with `/`).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// The health route lives beside the versioned API, not under it.
    pub fn health_url(&self) -> String {
        let root = self
            .base_url
            .strip_suffix("/api/v1")
            .unwrap_or(&self.base_url);
        format!("{root}/health")
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080/api/v1")
    }
}
