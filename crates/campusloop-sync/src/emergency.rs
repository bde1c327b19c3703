//! Campus-wide emergency flag mirrored from `EMERGENCY_STATE` broadcasts.
//!
//! The only writer is the broadcast. A local trigger sends a request and
//! marks the state as awaiting confirmation, but `active` does not change
//! until the server's broadcast comes back.

use campusloop_common::BuildingId;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmergencySnapshot {
    pub active: bool,
    pub message: String,
    pub target: Option<BuildingId>,
}

#[derive(Debug, Default)]
pub struct EmergencyState {
    current: EmergencySnapshot,
    /// Requested `active` value not yet confirmed by a broadcast.
    awaiting: Option<bool>,
}

impl EmergencyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the state verbatim with a broadcast value. Returns whether
    /// anything changed.
    pub fn apply_broadcast(&mut self, snapshot: EmergencySnapshot) -> bool {
        self.awaiting = None;
        if self.current == snapshot {
            return false;
        }
        info!(
            active = snapshot.active,
            target = ?snapshot.target,
            "emergency state updated"
        );
        self.current = snapshot;
        true
    }

    /// Record that a trigger request was sent.
    pub fn mark_requested(&mut self, active: bool) {
        self.awaiting = Some(active);
    }

    /// Clear the pending marker after the request itself failed.
    pub fn clear_request(&mut self) {
        self.awaiting = None;
    }

    pub fn awaiting_broadcast(&self) -> Option<bool> {
        self.awaiting
    }

    pub fn snapshot(&self) -> &EmergencySnapshot {
        &self.current
    }

    pub fn is_active(&self) -> bool {
        self.current.active
    }

    pub fn target(&self) -> Option<BuildingId> {
        self.current.target
    }
}
