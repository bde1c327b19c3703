//! Selection mode machine: which mode the user is in and what they have
//! picked inside it.

mod types;


pub use types::*;

use campusloop_common::{BuildingId, ErrandCategory};
use tracing::debug;

/// Tracks the interaction mode plus a mode-independent "selected building"
/// used for the info panel.
///
/// `epoch` changes on every mode change and on [`invalidate`](Self::invalidate),
/// so async work can check whether the context that issued it still holds.
#[derive(Debug, Clone, Default)]
pub struct SelectionModeMachine {
    mode: SelectionMode,
    selected: Option<BuildingId>,
    epoch: u64,
}

impl SelectionModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &SelectionMode {
        &self.mode
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn selected_building(&self) -> Option<BuildingId> {
        self.selected
    }

    pub fn clear_selected(&mut self) {
        self.selected = None;
    }

    pub fn is_planning(&self) -> bool {
        matches!(self.mode, SelectionMode::PlanningRoute { .. })
    }

    pub fn is_requesting_errand(&self) -> bool {
        matches!(self.mode, SelectionMode::RequestingErrand { .. })
    }

    /// Enter route planning with empty picks, leaving any other mode.
    pub fn enter_planning(&mut self) {
        self.set_mode(SelectionMode::PlanningRoute {
            start: None,
            end: None,
        });
    }

    /// Enter errand requesting with empty picks, leaving any other mode.
    pub fn enter_errand(&mut self, category: ErrandCategory) {
        self.set_mode(SelectionMode::RequestingErrand {
            category,
            pickup: None,
            dropoff: None,
        });
    }

    /// Change the errand category without touching the picks.
    pub fn set_category(&mut self, new_category: ErrandCategory) -> bool {
        match &mut self.mode {
            SelectionMode::RequestingErrand { category, .. } => {
                *category = new_category;
                true
            }
            _ => false,
        }
    }

    pub fn exit(&mut self) {
        self.set_mode(SelectionMode::Idle);
    }

    /// Drop every held id (picks and the selected building) after the
    /// layout they refer to was replaced. The mode itself is kept.
    pub fn invalidate(&mut self) {
        self.selected = None;
        self.epoch += 1;
        match &mut self.mode {
            SelectionMode::Idle => {}
            SelectionMode::PlanningRoute { start, end } => {
                *start = None;
                *end = None;
            }
            SelectionMode::RequestingErrand {
                pickup, dropoff, ..
            } => {
                *pickup = None;
                *dropoff = None;
            }
        }
    }

    /// Apply a building click according to the current mode.
    pub fn pick(&mut self, id: BuildingId) -> PickOutcome {
        let outcome = match &mut self.mode {
            SelectionMode::Idle => {
                self.selected = Some(id);
                PickOutcome::Selected
            }
            SelectionMode::PlanningRoute { start, end } => roll_pick(start, end, id),
            SelectionMode::RequestingErrand {
                pickup, dropoff, ..
            } => roll_pick(pickup, dropoff, id),
        };
        debug!(building = %id, ?outcome, mode = self.mode.label(), "pick");
        outcome
    }

    /// Both picks are set and differ.
    pub fn is_submittable(&self) -> bool {
        self.mode.complete_pair().is_some()
    }

    /// `(start, end)` when planning and submittable.
    pub fn route_picks(&self) -> Option<(BuildingId, BuildingId)> {
        match self.mode {
            SelectionMode::PlanningRoute { .. } => self.mode.complete_pair(),
            _ => None,
        }
    }

    /// `(category, pickup, dropoff)` when requesting and submittable.
    pub fn errand_picks(&self) -> Option<(ErrandCategory, BuildingId, BuildingId)> {
        match self.mode {
            SelectionMode::RequestingErrand { category, .. } => self
                .mode
                .complete_pair()
                .map(|(pickup, dropoff)| (category, pickup, dropoff)),
            _ => None,
        }
    }

    pub fn role_of(&self, id: BuildingId) -> Option<PickRole> {
        match self.mode {
            SelectionMode::Idle => None,
            SelectionMode::PlanningRoute { start, end } => {
                if start == Some(id) {
                    Some(PickRole::Start)
                } else if end == Some(id) {
                    Some(PickRole::End)
                } else {
                    None
                }
            }
            SelectionMode::RequestingErrand {
                pickup, dropoff, ..
            } => {
                if pickup == Some(id) {
                    Some(PickRole::Pickup)
                } else if dropoff == Some(id) {
                    Some(PickRole::Dropoff)
                } else {
                    None
                }
            }
        }
    }

    fn set_mode(&mut self, mode: SelectionMode) {
        self.epoch += 1;
        debug!(from = self.mode.label(), to = mode.label(), epoch = self.epoch, "mode change");
        self.mode = mode;
    }
}

/// Rolling two-slot pick rule shared by both modes.
fn roll_pick(
    first: &mut Option<BuildingId>,
    second: &mut Option<BuildingId>,
    id: BuildingId,
) -> PickOutcome {
    match (*first, *second) {
        // End-only state: the held id can only be deselected, never doubled.
        (None, Some(held)) if held == id => {
            *second = None;
            PickOutcome::ClearedSecond
        }
        (None, _) => {
            *first = Some(id);
            PickOutcome::SetFirst
        }
        (Some(a), None) if a != id => {
            *second = Some(id);
            PickOutcome::SetSecond
        }
        (Some(a), _) if a == id => {
            *first = None;
            PickOutcome::ClearedFirst
        }
        (Some(_), Some(b)) if b == id => {
            *second = None;
            PickOutcome::ClearedSecond
        }
        (Some(_), _) => {
            *first = Some(id);
            *second = None;
            PickOutcome::Restarted
        }
    }
}
