//! Network half of a plan submission.

use std::sync::Arc;
use std::time::Duration;

use campusloop_api::CampusApi;
use campusloop_common::UserId;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use super::PlanRequest;
use crate::events::{Completion, Inbound};

/// Create the plan, then run the effect timer and the match fetch side by
/// side. Each step is reported as soon as it happens.
pub(crate) async fn drive_submission(
    api: Arc<dyn CampusApi>,
    user: UserId,
    request: PlanRequest,
    transition: Duration,
    tx: UnboundedSender<Inbound>,
) {
    let ticket = request.ticket;
    let result = api.create_travel_plan(&user, &request.route).await;
    if let Err(e) = &result {
        warn!(error = %e, "travel plan rejected");
    }
    let plan = result.as_ref().ok().cloned();
    report(&tx, Completion::PlanCreated { ticket, result });
    let Some(plan) = plan else {
        return;
    };

    let gate = async {
        tokio::time::sleep(transition).await;
        report(&tx, Completion::GateElapsed { ticket });
    };
    let fetch = async {
        let result = api.get_matches(&plan).await;
        if let Err(e) = &result {
            warn!(plan = %plan, error = %e, "match lookup failed");
        }
        report(&tx, Completion::MatchesFetched { ticket, result });
    };
    tokio::join!(gate, fetch);
}

fn report(tx: &UnboundedSender<Inbound>, completion: Completion) {
    // The client is gone if this fails; nothing left to tell.
    let _ = tx.send(Inbound::Completion(completion));
}
