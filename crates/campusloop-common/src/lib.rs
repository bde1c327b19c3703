//! Shared types for the CampusLoop client: errors, identifiers, domain
//! models, and the user-visible notice queue.

pub mod errors;
pub mod id;
pub mod models;
pub mod notices;

pub use errors::{CampusError, ConfigError};
pub use id::{new_correlation_id, BuildingId, ErrandId, PlanId, UserId};
pub use models::{
    ChatMessage, Errand, ErrandCategory, ErrandRecord, ErrandStatus, LatLng, Match,
    MatchRecord, MatchedErrandRecord, PlanarPoint, Profile,
};
pub use notices::{Notice, NoticeLevel, NoticeQueue};

pub type Result<T> = std::result::Result<T, CampusError>;
