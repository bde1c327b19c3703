//! HTTP client struct, request building, and response handling.

use std::sync::Arc;

use campusloop_common::new_correlation_id;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::config::HttpConfig;
use crate::{ApiError, TokenSource};

/// CampusLoop REST client.
pub struct HttpCampusApi {
    pub(crate) config: HttpConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) tokens: Arc<dyn TokenSource>,
}

impl HttpCampusApi {
    pub fn new(config: HttpConfig, tokens: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            http,
            tokens,
        })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// `GET /health`. Ok when the server answers with a success status.
    pub async fn health(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .get(self.config.health_url())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).await.map(|_| ())
    }

    /// Start a request with auth and correlation headers attached.
    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = new_correlation_id();
        debug!(%method, path, request_id = %request_id, "API request");
        let mut builder = self
            .http
            .request(method, self.config.endpoint(path))
            .header("x-request-id", request_id);
        if let Some(token) = self.tokens.bearer_token().await {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send and discard the body of a successful response.
    pub(crate) async fn send_ack(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await.map_err(map_reqwest_error)?;
        check_status(response).await.map(|_| ())
    }
}

pub(crate) fn map_reqwest_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(e.to_string())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        warn!(%status, "request rejected by auth");
        return Err(ApiError::Unauthorized);
    }
    let text = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body: error_body(&text),
    })
}

/// Pull `{"error": "..."}` out of an error body, else keep a short prefix.
fn error_body(text: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
        if let Some(msg) = json.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }
    text.chars().take(200).collect()
}
