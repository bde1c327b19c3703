//! Outbound operations against the CampusLoop server.
//!
//! The client core only depends on the [`CampusApi`] trait; the reqwest
//! implementation in [`http`] is what the binary wires in. Retry and
//! timeout policy belong to the implementation, callers only see
//! success or an [`ApiError`].

pub mod geometry;
pub mod http;

use async_trait::async_trait;
use campusloop_common::{
    BuildingId, ChatMessage, Errand, ErrandCategory, ErrandId, ErrandStatus, Match, PlanId,
    PlanarPoint, Profile, UserId,
};

pub use geometry::{point_wkt, RouteGeometry};
pub use http::{HttpCampusApi, HttpConfig};

#[async_trait]
pub trait CampusApi: Send + Sync {
    async fn create_travel_plan(
        &self,
        user: &UserId,
        route: &RouteGeometry,
    ) -> Result<PlanId, ApiError>;

    async fn get_matches(&self, plan: &PlanId) -> Result<Vec<Match>, ApiError>;

    /// Returns the new errand's id. The errand itself reaches the client
    /// through the `NEW_ERRAND` broadcast or the next pending refetch.
    async fn create_errand(&self, errand: &NewErrand) -> Result<ErrandId, ApiError>;

    /// Pending errands, newest first.
    async fn get_pending_errands(&self) -> Result<Vec<Errand>, ApiError>;

    async fn update_errand_status(&self, id: &ErrandId, status: ErrandStatus)
        -> Result<(), ApiError>;

    async fn toggle_emergency(&self, request: &EmergencyRequest) -> Result<(), ApiError>;

    async fn get_profile(&self) -> Result<Profile, ApiError>;

    async fn get_chat_history(&self, errand: &ErrandId) -> Result<Vec<ChatMessage>, ApiError>;

    async fn send_message(
        &self,
        errand: &ErrandId,
        sender: &UserId,
        content: &str,
    ) -> Result<(), ApiError>;
}

/// Supplies the bearer token for each request.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer_token(&self) -> Option<String>;
}

/// A token fixed at startup (or none, for dev servers that skip auth).
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.is_empty()))
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Errand creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewErrand {
    pub user_id: UserId,
    pub title: String,
    pub category: ErrandCategory,
    pub description: String,
    pub pickup: PlanarPoint,
    pub dropoff: PlanarPoint,
    pub reward_estimate: f64,
}

/// Emergency toggle request. `target: None` means no specific building.
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyRequest {
    pub active: bool,
    pub message: String,
    pub target: Option<BuildingId>,
}

/// Transport failure on an outbound call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout")]
    Timeout,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short text for user-facing notices.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) | Self::Timeout => "Could not reach the campus server".into(),
            Self::Unauthorized => "Your session has expired, sign in again".into(),
            Self::Status { status, .. } if *status >= 500 => {
                "The campus server had a problem, try again".into()
            }
            Self::Status { body, .. } if !body.is_empty() => body.clone(),
            Self::Status { status, .. } => format!("Request rejected ({status})"),
            Self::Decode(_) => "Unexpected response from the campus server".into(),
        }
    }
}
