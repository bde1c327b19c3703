//! Domain models shared by the transport, sync, and client crates.
//!
//! Server rows arrive in a few different shapes (flat lat/lng columns for
//! the pending list, nested points for match results). The `*Record`
//! structs mirror those shapes exactly and convert into the single
//! [`Errand`] type the rest of the client works with.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ErrandId, UserId};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A point on the campus ground plane.
///
/// The server stores the same point as `(lat, lng)`, where `lat` is the
/// map's `z` axis and `lng` is its `x` axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub z: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn from_lat_lng(lat: f64, lng: f64) -> Self {
        Self { x: lng, z: lat }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for PlanarPoint {
    fn from(p: LatLng) -> Self {
        PlanarPoint::from_lat_lng(p.lat, p.lng)
    }
}

// ---------------------------------------------------------------------------
// Errands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrandCategory {
    #[default]
    Delivery,
    Borrow,
    Favor,
    /// A category posted by another client that this one does not offer.
    #[serde(other)]
    Other,
}

impl ErrandCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Borrow => "borrow",
            Self::Favor => "favor",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ErrandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrandCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delivery" => Ok(Self::Delivery),
            "borrow" => Ok(Self::Borrow),
            "favor" | "favour" => Ok(Self::Favor),
            other => Err(format!("unknown errand category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrandStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
    /// Any server status this client does not model (e.g. `matched`).
    #[serde(other)]
    Other,
}

impl ErrandStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other => "other",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for ErrandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A posted errand as held by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Errand {
    pub id: ErrandId,
    pub title: String,
    pub description: String,
    pub category: ErrandCategory,
    pub reward_estimate: f64,
    pub pickup: PlanarPoint,
    pub dropoff: PlanarPoint,
    pub status: ErrandStatus,
    pub requester: Option<UserId>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Flat errand row returned by the pending list and carried by
/// `NEW_ERRAND` broadcasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrandRecord {
    pub id: ErrandId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ErrandCategory,
    #[serde(default)]
    pub reward_estimate: f64,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
    #[serde(default)]
    pub status: ErrandStatus,
}

impl From<ErrandRecord> for Errand {
    fn from(r: ErrandRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            category: r.category,
            reward_estimate: r.reward_estimate,
            pickup: PlanarPoint::from_lat_lng(r.pickup_lat, r.pickup_lng),
            dropoff: PlanarPoint::from_lat_lng(r.dropoff_lat, r.dropoff_lng),
            status: r.status,
            requester: None,
            created_at: None,
        }
    }
}

/// Errand as nested inside a match result.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchedErrandRecord {
    pub id: ErrandId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub pickup: LatLng,
    pub dropoff: LatLng,
    #[serde(default)]
    pub status: ErrandStatus,
    #[serde(default)]
    pub category: ErrandCategory,
    #[serde(default)]
    pub reward_estimate: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<MatchedErrandRecord> for Errand {
    fn from(r: MatchedErrandRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            category: r.category,
            reward_estimate: r.reward_estimate,
            pickup: r.pickup.into(),
            dropoff: r.dropoff.into(),
            status: r.status,
            requester: r.user_id,
            created_at: r.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRecord {
    pub errand: MatchedErrandRecord,
    pub distance_from_route: f64,
}

/// An errand scored against a submitted route.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub errand: Errand,
    /// Detour distance from the route, in meters.
    pub detour: f64,
}

impl From<MatchRecord> for Match {
    fn from(r: MatchRecord) -> Self {
        Self {
            errand: r.errand.into(),
            detour: r.distance_from_route,
        }
    }
}

// ---------------------------------------------------------------------------
// Chat / profile
// ---------------------------------------------------------------------------

/// A chat line. Messages have no client-side identity; order is arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub errand_id: ErrandId,
    pub sender_id: UserId,
    pub content: String,
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub credits: i64,
    #[serde(default)]
    pub xp: i64,
    /// Server-computed rank label.
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub rating: Option<f64>,
}
