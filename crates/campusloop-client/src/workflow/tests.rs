use campusloop_common::{
    BuildingId, Errand, ErrandCategory, ErrandId, ErrandStatus, Match, PlanId, PlanarPoint,
};
use campusloop_map::{BuildingArena, LayoutParams};

use super::*;

fn arena() -> BuildingArena {
    BuildingArena::new(LayoutParams::default(), Some(11))
}

fn planning(a: u32, b: u32) -> SelectionModeMachine {
    let mut selection = SelectionModeMachine::new();
    selection.enter_planning();
    selection.pick(BuildingId(a));
    selection.pick(BuildingId(b));
    selection
}

fn a_match(id: &str) -> Match {
    Match {
        errand: Errand {
            id: ErrandId::from(id),
            title: "Coffee".into(),
            description: String::new(),
            category: ErrandCategory::Delivery,
            reward_estimate: 4.0,
            pickup: PlanarPoint::new(0.0, 0.0),
            dropoff: PlanarPoint::new(1.0, 1.0),
            status: ErrandStatus::Pending,
            requester: None,
            created_at: None,
        },
        detour: 35.0,
    }
}

fn boom() -> ApiError {
    ApiError::Status {
        status: 500,
        body: "boom".into(),
    }
}

#[test]
fn begin_needs_two_picks() {
    let arena = arena();
    let mut selection = SelectionModeMachine::new();
    selection.enter_planning();
    selection.pick(BuildingId(3));

    let mut wf = PlanSubmissionWorkflow::new();
    assert_eq!(
        wf.begin(&selection, arena.layout()).unwrap_err(),
        WorkflowError::NotSubmittable
    );
    assert_eq!(wf.phase(), &PlanPhase::Idle);
}

#[test]
fn begin_builds_route_from_planar_positions() {
    let arena = arena();
    let selection = planning(3, 7);
    let mut wf = PlanSubmissionWorkflow::new();

    let request = wf.begin(&selection, arena.layout()).unwrap();
    let start = arena.get(BuildingId(3)).unwrap().planar();
    let end = arena.get(BuildingId(7)).unwrap().planar();
    assert_eq!(request.route.points(), &[start, end]);
    assert_eq!(wf.phase(), &PlanPhase::Submitting);
    assert!(!wf.is_transition_active());
}

#[test]
fn second_begin_while_in_flight_is_rejected() {
    let arena = arena();
    let selection = planning(3, 7);
    let mut wf = PlanSubmissionWorkflow::new();
    wf.begin(&selection, arena.layout()).unwrap();
    assert_eq!(
        wf.begin(&selection, arena.layout()).unwrap_err(),
        WorkflowError::InFlight
    );
}

#[test]
fn unknown_building_is_rejected() {
    let arena = arena();
    let selection = planning(3, 999);
    let mut wf = PlanSubmissionWorkflow::new();
    assert_eq!(
        wf.begin(&selection, arena.layout()).unwrap_err(),
        WorkflowError::UnknownBuilding(BuildingId(999))
    );
    assert!(!wf.is_in_flight());
}

#[test]
fn fast_matches_wait_for_the_gate() {
    let arena = arena();
    let selection = planning(3, 7);
    let epoch = selection.epoch();
    let mut wf = PlanSubmissionWorkflow::new();
    let request = wf.begin(&selection, arena.layout()).unwrap();

    let step = wf.on_plan_created(request.ticket, epoch, Ok(PlanId::from("p1")));
    assert_eq!(step, Step::Progressed);
    assert_eq!(wf.phase(), &PlanPhase::TransitionEffect);

    let step = wf.on_matches(request.ticket, epoch, Ok(vec![a_match("e1")]));
    assert_eq!(step, Step::Progressed);
    assert_eq!(wf.phase(), &PlanPhase::TransitionEffect);
    assert!(wf.is_transition_active());

    match wf.on_gate_elapsed(request.ticket, epoch) {
        Step::Reveal(reveal) => {
            assert_eq!(reveal.plan, PlanId::from("p1"));
            assert_eq!(reveal.matches.len(), 1);
            assert_eq!(reveal.route, request.route);
        }
        other => panic!("expected reveal, got {other:?}"),
    }
    assert_eq!(wf.phase(), &PlanPhase::Revealed);
    assert!(!wf.is_in_flight());
    assert!(!wf.is_transition_active());
}

#[test]
fn slow_matches_reveal_after_gate() {
    let arena = arena();
    let selection = planning(1, 2);
    let epoch = selection.epoch();
    let mut wf = PlanSubmissionWorkflow::new();
    let request = wf.begin(&selection, arena.layout()).unwrap();
    wf.on_plan_created(request.ticket, epoch, Ok(PlanId::from("p2")));

    assert_eq!(wf.on_gate_elapsed(request.ticket, epoch), Step::Progressed);
    assert_eq!(wf.phase(), &PlanPhase::FetchingMatches);
    assert!(matches!(
        wf.on_matches(request.ticket, epoch, Ok(vec![])),
        Step::Reveal(_)
    ));
}

#[test]
fn plan_failure_returns_to_idle_equivalent() {
    let arena = arena();
    let selection = planning(3, 7);
    let epoch = selection.epoch();
    let mut wf = PlanSubmissionWorkflow::new();
    let request = wf.begin(&selection, arena.layout()).unwrap();

    assert_eq!(
        wf.on_plan_created(request.ticket, epoch, Err(boom())),
        Step::Failed(boom())
    );
    assert_eq!(wf.phase(), &PlanPhase::Failed(boom()));
    assert!(!wf.is_in_flight());
    // Retry with the same picks.
    assert!(wf.begin(&selection, arena.layout()).is_ok());
}

#[test]
fn early_match_failure_surfaces_at_gate() {
    let arena = arena();
    let selection = planning(3, 7);
    let epoch = selection.epoch();
    let mut wf = PlanSubmissionWorkflow::new();
    let request = wf.begin(&selection, arena.layout()).unwrap();
    wf.on_plan_created(request.ticket, epoch, Ok(PlanId::from("p3")));

    assert_eq!(
        wf.on_matches(request.ticket, epoch, Err(ApiError::Timeout)),
        Step::Progressed
    );
    assert_eq!(wf.phase(), &PlanPhase::TransitionEffect);
    assert_eq!(
        wf.on_gate_elapsed(request.ticket, epoch),
        Step::Failed(ApiError::Timeout)
    );
}

#[test]
fn changed_selection_makes_results_stale() {
    let arena = arena();
    let mut selection = planning(3, 7);
    let mut wf = PlanSubmissionWorkflow::new();
    let request = wf.begin(&selection, arena.layout()).unwrap();

    selection.exit();
    let step = wf.on_plan_created(request.ticket, selection.epoch(), Ok(PlanId::from("p4")));
    assert_eq!(step, Step::Stale);
    assert_eq!(wf.phase(), &PlanPhase::Idle);
    assert!(!wf.is_in_flight());
}

#[test]
fn abandoned_submission_ignores_late_steps() {
    let arena = arena();
    let selection = planning(3, 7);
    let epoch = selection.epoch();
    let mut wf = PlanSubmissionWorkflow::new();
    let request = wf.begin(&selection, arena.layout()).unwrap();
    wf.on_plan_created(request.ticket, epoch, Ok(PlanId::from("p5")));

    wf.abandon();
    assert_eq!(wf.on_gate_elapsed(request.ticket, epoch), Step::Stale);
    assert_eq!(wf.on_matches(request.ticket, epoch, Ok(vec![])), Step::Stale);
    assert_eq!(wf.phase(), &PlanPhase::Idle);
}

#[test]
fn old_ticket_cannot_touch_new_submission() {
    let arena = arena();
    let selection = planning(3, 7);
    let epoch = selection.epoch();
    let mut wf = PlanSubmissionWorkflow::new();
    let first = wf.begin(&selection, arena.layout()).unwrap();
    wf.abandon();
    let second = wf.begin(&selection, arena.layout()).unwrap();

    assert_eq!(wf.on_plan_created(first.ticket, epoch, Err(boom())), Step::Stale);
    assert_eq!(wf.phase(), &PlanPhase::Submitting);
    assert_eq!(
        wf.on_plan_created(second.ticket, epoch, Ok(PlanId::from("p6"))),
        Step::Progressed
    );
}

#[test]
fn reset_only_clears_settled_phases() {
    let arena = arena();
    let selection = planning(3, 7);
    let mut wf = PlanSubmissionWorkflow::new();
    wf.begin(&selection, arena.layout()).unwrap();
    wf.reset();
    assert_eq!(wf.phase(), &PlanPhase::Submitting);
}
