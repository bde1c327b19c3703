//! Wire protocol for the live event channel.
//!
//! Every frame is a JSON envelope `{"type": <kind>, "payload": <json>}`.
//! Payload shape depends on the kind; see [`kinds`].

use campusloop_common::{BuildingId, ErrandId, ErrandRecord, ErrandStatus, UserId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::emergency::EmergencySnapshot;

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

pub mod kinds {
    /// Payload: flat errand row ([`ErrandRecord`](campusloop_common::ErrandRecord)).
    pub const NEW_ERRAND: &str = "NEW_ERRAND";
    /// Payload: [`StatusUpdate`](super::StatusUpdate).
    pub const ERRAND_STATUS_UPDATE: &str = "ERRAND_STATUS_UPDATE";
    /// Payload: [`EmergencyPayload`](super::EmergencyPayload).
    pub const EMERGENCY_STATE: &str = "EMERGENCY_STATE";
    /// Payload: [`ChatMessage`](campusloop_common::ChatMessage).
    pub const NEW_MESSAGE: &str = "NEW_MESSAGE";
    /// Payload: [`MatchNotification`](super::MatchNotification).
    pub const MATCH_NOTIFICATION: &str = "MATCH_NOTIFICATION";
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A frame or payload that could not be understood. Logged and dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventError {
    #[error("malformed envelope: {0}")]
    Envelope(String),
    #[error("malformed {kind} payload: {reason}")]
    Payload { kind: String, reason: String },
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl Envelope {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Parse a frame. Only a JSON object with a non-empty string `type` is
    /// an envelope; arrays and other shapes are rejected.
    pub fn parse(text: &str) -> Result<Self, EventError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| EventError::Envelope(e.to_string()))?;
        let Value::Object(mut fields) = value else {
            return Err(EventError::Envelope("frame is not a JSON object".into()));
        };
        let kind = match fields.remove("type") {
            Some(Value::String(kind)) if !kind.is_empty() => kind,
            Some(Value::String(_)) => return Err(EventError::Envelope("empty event type".into())),
            Some(_) => return Err(EventError::Envelope("event type is not a string".into())),
            None => return Err(EventError::Envelope("missing event type".into())),
        };
        let payload = fields.remove("payload").unwrap_or(Value::Null);
        Ok(Self { kind, payload })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Decode a payload for `kind` into its typed form.
pub fn decode<T: DeserializeOwned>(kind: &str, payload: &Value) -> Result<T, EventError> {
    T::deserialize(payload).map_err(|e| EventError::Payload {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub id: ErrandId,
    pub status: ErrandStatus,
}

/// `building_id` is `-1` (or absent) when no building is targeted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyPayload {
    pub active: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "no_target")]
    pub building_id: i64,
}

fn no_target() -> i64 {
    -1
}

impl From<EmergencyPayload> for EmergencySnapshot {
    fn from(p: EmergencyPayload) -> Self {
        let target = u32::try_from(p.building_id).ok().map(BuildingId);
        Self {
            active: p.active,
            message: p.message,
            target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchNotification {
    pub errand: ErrandRecord,
    #[serde(default)]
    pub matched_user_ids: Vec<UserId>,
}
