//! The client controller: owns all state and applies queued events.

mod actions;
mod handlers;


use std::future::Future;
use std::sync::Arc;

use campusloop_api::{ApiError, CampusApi, RouteGeometry};
use campusloop_common::{Errand, ErrandId, ErrandStatus, Match, Notice, NoticeQueue, Profile, UserId};
use campusloop_map::{BuildingArena, Layout, SelectionModeMachine};
use campusloop_sync::{
    ChannelStatus, ChatSession, Disposition, EmergencyState, EventChannel, HandlerId,
    InFlightChanges, OptimisticCollection,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::events::{Broadcast, ClientUpdate, Completion, Inbound};
use crate::options::ClientOptions;
use crate::workflow::{PlanPhase, PlanSubmissionWorkflow, Step};

pub struct CampusClient {
    api: Arc<dyn CampusApi>,
    channel: EventChannel,
    handlers: Vec<(&'static str, HandlerId)>,
    options: ClientOptions,

    arena: BuildingArena,
    selection: SelectionModeMachine,
    workflow: PlanSubmissionWorkflow,
    errands: OptimisticCollection<Errand>,
    emergency: EmergencyState,
    chat: ChatSession,
    profile: Option<Profile>,
    notices: NoticeQueue,

    /// Revealed by the last plan submission.
    matches: Vec<Match>,
    active_route: Option<RouteGeometry>,

    /// Selection epoch of the errand request in flight.
    errand_submission: Option<u64>,
    pending_seq: u64,
    /// Errand changes seen since the latest pending refetch was issued.
    pending_changes: Option<InFlightChanges<Errand>>,
    profile_seq: u64,

    tx: UnboundedSender<Inbound>,
    rx: UnboundedReceiver<Inbound>,
}

impl CampusClient {
    /// Build the client and register its handlers on `channel`. The
    /// channel is not connected until [`connect`](Self::connect).
    pub fn new(api: Arc<dyn CampusApi>, mut channel: EventChannel, options: ClientOptions) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handlers = handlers::register(&mut channel, &tx);
        let arena = BuildingArena::new(options.layout.clone(), options.layout_seed);
        let notices = NoticeQueue::new(options.notice_capacity);

        Self {
            api,
            channel,
            handlers,
            options,
            arena,
            selection: SelectionModeMachine::new(),
            workflow: PlanSubmissionWorkflow::new(),
            errands: OptimisticCollection::new(),
            emergency: EmergencyState::new(),
            chat: ChatSession::new(),
            profile: None,
            notices,
            matches: Vec::new(),
            active_route: None,
            errand_submission: None,
            pending_seq: 0,
            pending_changes: None,
            profile_seq: 0,
            tx,
            rx,
        }
    }

    // -- state ------------------------------------------------------------

    pub fn identity(&self) -> Option<&UserId> {
        self.options.identity.as_ref()
    }

    pub fn layout(&self) -> &Layout {
        self.arena.layout()
    }

    pub fn selection(&self) -> &SelectionModeMachine {
        &self.selection
    }

    pub fn workflow(&self) -> &PlanSubmissionWorkflow {
        &self.workflow
    }

    pub fn plan_phase(&self) -> &PlanPhase {
        self.workflow.phase()
    }

    /// Pending errands, newest first.
    pub fn errands(&self) -> &OptimisticCollection<Errand> {
        &self.errands
    }

    pub fn emergency(&self) -> &EmergencyState {
        &self.emergency
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn active_route(&self) -> Option<&RouteGeometry> {
        self.active_route.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    pub fn channel(&self) -> &EventChannel {
        &self.channel
    }

    pub fn notices_mut(&mut self) -> &mut NoticeQueue {
        &mut self.notices
    }

    /// Notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take_unseen()
    }

    // -- event loop -------------------------------------------------------

    /// Wait for the next channel status change, broadcast, or call result
    /// and apply it. Cancel-safe.
    pub async fn next_event(&mut self) -> ClientUpdate {
        tokio::select! {
            status = self.channel.next_status() => self.on_channel_status(status),
            Some(inbound) = self.rx.recv() => self.apply(inbound),
        }
    }

    fn on_channel_status(&mut self, status: Option<ChannelStatus>) -> ClientUpdate {
        match status {
            Some(ChannelStatus::Connected) => {
                info!("event channel connected, reconciling");
                self.refresh_pending();
                self.refresh_profile();
                ClientUpdate::Channel(ChannelStatus::Connected)
            }
            Some(ChannelStatus::Disconnected) => {
                info!("event channel disconnected, data may be stale until reconnect");
                ClientUpdate::Channel(ChannelStatus::Disconnected)
            }
            None => {
                warn!("event channel stopped");
                ClientUpdate::Channel(ChannelStatus::Disconnected)
            }
        }
    }

    fn apply(&mut self, inbound: Inbound) -> ClientUpdate {
        match inbound {
            Inbound::Broadcast(broadcast) => self.apply_broadcast(broadcast),
            Inbound::Completion(completion) => self.apply_completion(completion),
        }
    }

    fn apply_broadcast(&mut self, broadcast: Broadcast) -> ClientUpdate {
        match broadcast {
            Broadcast::NewErrand(errand) => {
                if errand.status.is_pending() {
                    self.upsert_errand(errand);
                } else {
                    self.remove_errand(&errand.id);
                }
                ClientUpdate::Errands
            }
            Broadcast::StatusUpdate(update) => {
                if update.status.is_pending() {
                    return ClientUpdate::Nothing;
                }
                match self.remove_errand(&update.id) {
                    Some(_) => {
                        debug!(errand = %update.id, status = %update.status, "errand left pending");
                        ClientUpdate::Errands
                    }
                    None => ClientUpdate::Nothing,
                }
            }
            Broadcast::Emergency(snapshot) => {
                if self.emergency.apply_broadcast(snapshot) {
                    ClientUpdate::Emergency
                } else {
                    ClientUpdate::Nothing
                }
            }
            Broadcast::Message(message) => {
                if self.chat.on_new_message(message) {
                    ClientUpdate::Chat
                } else {
                    ClientUpdate::Nothing
                }
            }
            Broadcast::Matched { errand, users } => {
                let me = match &self.options.identity {
                    Some(me) => me,
                    None => return ClientUpdate::Nothing,
                };
                if !users.contains(me) {
                    return ClientUpdate::Nothing;
                }
                info!(errand = %errand.id, "errand matched to our route");
                self.notices
                    .push(Notice::info("New errand on your route", errand.title));
                ClientUpdate::Notice
            }
        }
    }

    fn apply_completion(&mut self, completion: Completion) -> ClientUpdate {
        let epoch = self.selection.epoch();
        match completion {
            Completion::PlanCreated { ticket, result } => {
                let step = self.workflow.on_plan_created(ticket, epoch, result);
                self.on_step(step)
            }
            Completion::GateElapsed { ticket } => {
                let step = self.workflow.on_gate_elapsed(ticket, epoch);
                self.on_step(step)
            }
            Completion::MatchesFetched { ticket, result } => {
                let step = self.workflow.on_matches(ticket, epoch, result);
                self.on_step(step)
            }
            Completion::ErrandCreated { epoch: issued, result } => {
                self.errand_submission = None;
                match result {
                    Ok(id) => {
                        info!(errand = %id, "errand posted");
                        if issued == epoch {
                            self.selection.exit();
                        }
                        self.refresh_pending();
                        ClientUpdate::ErrandPosted(id)
                    }
                    Err(e) => self.surface("Could not post errand", &e),
                }
            }
            Completion::PendingFetched { seq, result } => {
                if seq != self.pending_seq {
                    debug!(seq, latest = self.pending_seq, "dropping stale errand refetch");
                    return ClientUpdate::Nothing;
                }
                let changes = self.pending_changes.take().unwrap_or_default();
                match result {
                    Ok(errands) => {
                        self.errands.reconcile(
                            errands.into_iter().filter(|e| e.status.is_pending()),
                            changes,
                        );
                        debug!(count = self.errands.len(), "pending errands refreshed");
                        ClientUpdate::Errands
                    }
                    Err(e) => self.surface("Could not refresh errands", &e),
                }
            }
            Completion::ProfileFetched { seq, result } => {
                if seq != self.profile_seq {
                    debug!(seq, latest = self.profile_seq, "dropping stale profile");
                    return ClientUpdate::Nothing;
                }
                match result {
                    Ok(profile) => {
                        self.profile = Some(profile);
                        ClientUpdate::Profile
                    }
                    Err(e) => self.surface("Could not load profile", &e),
                }
            }
            Completion::StatusChanged { id, status, result } => match result {
                Ok(()) => {
                    self.remove_errand(&id);
                    if status == ErrandStatus::Completed {
                        self.refresh_profile();
                    }
                    ClientUpdate::Errands
                }
                Err(e) => self.surface("Could not update errand", &e),
            },
            Completion::EmergencySent { result } => match result {
                Ok(()) => {
                    debug!("emergency request sent, waiting for broadcast");
                    ClientUpdate::Nothing
                }
                Err(e) => {
                    self.emergency.clear_request();
                    self.surface("Emergency request failed", &e)
                }
            },
            Completion::HistoryFetched { ticket, result } => match result {
                Ok(history) => match self.chat.apply_history(&ticket, history) {
                    Disposition::Applied => ClientUpdate::Chat,
                    Disposition::Stale => ClientUpdate::Nothing,
                },
                Err(e) => match self.chat.history_failed(&ticket) {
                    Disposition::Applied => self.surface("Could not load chat", &e),
                    Disposition::Stale => ClientUpdate::Nothing,
                },
            },
            Completion::MessageSent { result } => match result {
                Ok(()) => ClientUpdate::Nothing,
                Err(e) => self.surface("Message not sent", &e),
            },
        }
    }

    fn on_step(&mut self, step: Step) -> ClientUpdate {
        match step {
            Step::Stale => ClientUpdate::Nothing,
            Step::Progressed => ClientUpdate::Plan(self.workflow.phase().clone()),
            Step::Failed(e) => {
                self.surface("Route submission failed", &e);
                ClientUpdate::Plan(self.workflow.phase().clone())
            }
            Step::Reveal(reveal) => {
                info!(plan = %reveal.plan, matches = reveal.matches.len(), "route matches revealed");
                self.matches = reveal.matches;
                self.active_route = Some(reveal.route);
                self.selection.exit();
                ClientUpdate::Plan(PlanPhase::Revealed)
            }
        }
    }

    fn upsert_errand(&mut self, errand: Errand) {
        if let Some(changes) = self.pending_changes.as_mut() {
            changes.note_upsert(&errand);
        }
        self.errands.upsert_from_server(errand);
    }

    /// Remove an errand from the pending view. A refetch in flight will not
    /// bring it back.
    fn remove_errand(&mut self, id: &ErrandId) -> Option<Errand> {
        if let Some(changes) = self.pending_changes.as_mut() {
            changes.note_removed(id);
        }
        self.errands.remove_by_id(id)
    }

    /// Log a transport failure and raise a notice for it.
    fn surface(&mut self, title: &str, error: &ApiError) -> ClientUpdate {
        warn!(error = %error, action = title, "transport failure");
        self.notices.push(Notice::error(title, error.user_message()));
        ClientUpdate::Notice
    }

    /// Run an outbound call on its own task and queue its result.
    fn spawn_call<F>(&self, call: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let completion = call.await;
            let _ = tx.send(Inbound::Completion(completion));
        });
    }
}
