//! Selection mode and pick outcome types.

use campusloop_common::{BuildingId, ErrandCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Idle,
    PlanningRoute {
        start: Option<BuildingId>,
        end: Option<BuildingId>,
    },
    RequestingErrand {
        category: ErrandCategory,
        pickup: Option<BuildingId>,
        dropoff: Option<BuildingId>,
    },
}

impl SelectionMode {
    /// Both picks, when both are set and differ.
    pub fn complete_pair(&self) -> Option<(BuildingId, BuildingId)> {
        let (first, second) = match *self {
            Self::Idle => return None,
            Self::PlanningRoute { start, end } => (start, end),
            Self::RequestingErrand { pickup, dropoff, .. } => (pickup, dropoff),
        };
        match (first, second) {
            (Some(a), Some(b)) if a != b => Some((a, b)),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PlanningRoute { .. } => "planning",
            Self::RequestingErrand { .. } => "errand",
        }
    }
}

/// What a `pick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Idle mode: the info-panel selection changed.
    Selected,
    SetFirst,
    SetSecond,
    ClearedFirst,
    ClearedSecond,
    /// Both picks were held; the new id starts a fresh pair.
    Restarted,
}

/// Role a building plays in the current mode, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickRole {
    Start,
    End,
    Pickup,
    Dropoff,
}
