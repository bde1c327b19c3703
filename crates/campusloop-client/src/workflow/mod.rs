//! Plan submission: submit route, hold the transition effect, fetch
//! matches, reveal.
//!
//! The machine here is pure. [`driver::drive_submission`] runs the network
//! half and reports each step back; the timer and the match fetch start
//! together once the plan exists, and the reveal waits for whichever
//! finishes last. A match failure that lands before the timer is held
//! until the timer fires.

pub(crate) mod driver;

#[cfg(test)]
mod tests;

use campusloop_api::{ApiError, RouteGeometry};
use campusloop_common::{Match, PlanId};
use campusloop_map::{Layout, SelectionModeMachine};
use tracing::debug;

use crate::WorkflowError;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlanPhase {
    #[default]
    Idle,
    /// Waiting for the server to accept the route.
    Submitting,
    /// Plan accepted; the effect timer is running and matches may still be
    /// loading.
    TransitionEffect,
    /// The effect timer is done; still waiting on matches.
    FetchingMatches,
    Revealed,
    /// Back to idle after a transport failure. Picks are left alone.
    Failed(ApiError),
}

impl PlanPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::Submitting | Self::TransitionEffect | Self::FetchingMatches
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::TransitionEffect => "transition",
            Self::FetchingMatches => "fetching matches",
            Self::Revealed => "revealed",
            Self::Failed(_) => "failed",
        }
    }
}

/// Identifies one submission and the selection context it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    id: u64,
    selection_epoch: u64,
}

/// What the driver needs to run a submission.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub ticket: SubmissionTicket,
    pub route: RouteGeometry,
}

/// Handed to the caller when matches are revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reveal {
    pub plan: PlanId,
    pub matches: Vec<Match>,
    pub route: RouteGeometry,
}

/// Outcome of feeding one step into the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The submission this step belongs to is no longer current.
    Stale,
    /// Phase moved on; nothing for the caller to do.
    Progressed,
    Failed(ApiError),
    Reveal(Reveal),
}

#[derive(Debug)]
struct InFlight {
    ticket: SubmissionTicket,
    route: RouteGeometry,
    plan: Option<PlanId>,
    gate_elapsed: bool,
    matches: Option<Result<Vec<Match>, ApiError>>,
}

#[derive(Debug, Default)]
pub struct PlanSubmissionWorkflow {
    phase: PlanPhase,
    next_id: u64,
    in_flight: Option<InFlight>,
}

impl PlanSubmissionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &PlanPhase {
        &self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the transition effect should be showing.
    pub fn is_transition_active(&self) -> bool {
        matches!(
            self.phase,
            PlanPhase::TransitionEffect | PlanPhase::FetchingMatches
        )
    }

    /// Start a submission from the current route picks.
    pub fn begin(
        &mut self,
        selection: &SelectionModeMachine,
        layout: &Layout,
    ) -> Result<PlanRequest, WorkflowError> {
        if self.in_flight.is_some() {
            return Err(WorkflowError::InFlight);
        }
        let (start, end) = selection.route_picks().ok_or(WorkflowError::NotSubmittable)?;
        let start = layout.get(start).ok_or(WorkflowError::UnknownBuilding(start))?;
        let end = layout.get(end).ok_or(WorkflowError::UnknownBuilding(end))?;
        let route = RouteGeometry::between(start.planar(), end.planar());

        self.next_id += 1;
        let ticket = SubmissionTicket {
            id: self.next_id,
            selection_epoch: selection.epoch(),
        };
        self.in_flight = Some(InFlight {
            ticket,
            route: route.clone(),
            plan: None,
            gate_elapsed: false,
            matches: None,
        });
        self.phase = PlanPhase::Submitting;
        debug!(ticket = ticket.id, from = %start.id, to = %end.id, "plan submission started");
        Ok(PlanRequest { ticket, route })
    }

    /// Drop the current submission. Late results for it become stale.
    pub fn abandon(&mut self) {
        if self.in_flight.take().is_some() {
            debug!("plan submission abandoned");
            self.phase = PlanPhase::Idle;
        }
    }

    /// Forget a finished reveal or failure.
    pub fn reset(&mut self) {
        if !self.phase.is_in_flight() {
            self.phase = PlanPhase::Idle;
        }
    }

    pub fn on_plan_created(
        &mut self,
        ticket: SubmissionTicket,
        selection_epoch: u64,
        result: Result<PlanId, ApiError>,
    ) -> Step {
        let Some(flight) = self.current(ticket, selection_epoch) else {
            return Step::Stale;
        };
        match result {
            Ok(plan) => {
                debug!(ticket = ticket.id, plan = %plan, "plan accepted");
                flight.plan = Some(plan);
                self.phase = PlanPhase::TransitionEffect;
                Step::Progressed
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn on_gate_elapsed(&mut self, ticket: SubmissionTicket, selection_epoch: u64) -> Step {
        let Some(flight) = self.current(ticket, selection_epoch) else {
            return Step::Stale;
        };
        flight.gate_elapsed = true;
        if flight.matches.is_some() {
            return self.settle();
        }
        self.phase = PlanPhase::FetchingMatches;
        Step::Progressed
    }

    pub fn on_matches(
        &mut self,
        ticket: SubmissionTicket,
        selection_epoch: u64,
        result: Result<Vec<Match>, ApiError>,
    ) -> Step {
        let Some(flight) = self.current(ticket, selection_epoch) else {
            return Step::Stale;
        };
        flight.matches = Some(result);
        if flight.gate_elapsed {
            return self.settle();
        }
        Step::Progressed
    }

    /// The in-flight submission if `ticket` still names it and the
    /// selection has not moved on. A moved-on selection drops it.
    fn current(&mut self, ticket: SubmissionTicket, selection_epoch: u64) -> Option<&mut InFlight> {
        let is_current = self.in_flight.as_ref().is_some_and(|f| f.ticket == ticket);
        if !is_current {
            debug!(ticket = ticket.id, "stale submission result");
            return None;
        }
        if ticket.selection_epoch != selection_epoch {
            debug!(ticket = ticket.id, "selection changed, dropping submission");
            self.in_flight = None;
            self.phase = PlanPhase::Idle;
            return None;
        }
        self.in_flight.as_mut()
    }

    /// Both the timer and the fetch are done.
    fn settle(&mut self) -> Step {
        let Some(flight) = self.in_flight.take() else {
            return Step::Stale;
        };
        match (flight.plan, flight.matches) {
            (Some(plan), Some(Ok(matches))) => {
                debug!(plan = %plan, matches = matches.len(), "matches revealed");
                self.phase = PlanPhase::Revealed;
                Step::Reveal(Reveal {
                    plan,
                    matches,
                    route: flight.route,
                })
            }
            (_, Some(Err(e))) => self.fail(e),
            (_, None) | (None, _) => {
                self.phase = PlanPhase::Idle;
                Step::Stale
            }
        }
    }

    fn fail(&mut self, error: ApiError) -> Step {
        self.in_flight = None;
        self.phase = PlanPhase::Failed(error.clone());
        Step::Failed(error)
    }
}
