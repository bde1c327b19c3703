//! User actions. Each validates synchronously, then hands any network
//! work to a spawned task whose result comes back through `next_event`.

use campusloop_api::{EmergencyRequest, NewErrand};
use campusloop_common::{BuildingId, ErrandCategory, ErrandId, ErrandStatus};
use campusloop_map::PickOutcome;
use campusloop_sync::InFlightChanges;
use tracing::{debug, info};

use super::CampusClient;
use crate::events::Completion;
use crate::options::ErrandDraft;
use crate::workflow::driver::drive_submission;
use crate::WorkflowError;

impl CampusClient {
    // -- connection -------------------------------------------------------

    /// Start the event channel. No-op if it is already running.
    pub fn connect(&mut self) -> bool {
        self.channel.connect(self.options.identity.as_ref())
    }

    /// Stop the event channel and drop this client's handlers.
    pub fn shutdown(&mut self) {
        for (kind, id) in self.handlers.drain(..) {
            self.channel.off(kind, id);
        }
        self.channel.disconnect();
    }

    // -- selection --------------------------------------------------------

    pub fn enter_planning(&mut self) {
        self.leave_current_mode();
        self.selection.enter_planning();
    }

    pub fn enter_errand(&mut self, category: ErrandCategory) {
        self.leave_current_mode();
        self.selection.enter_errand(category);
    }

    pub fn set_errand_category(&mut self, category: ErrandCategory) -> bool {
        self.selection.set_category(category)
    }

    pub fn exit_mode(&mut self) {
        self.workflow.abandon();
        self.selection.exit();
    }

    /// Click a building. Ids outside the current layout are rejected.
    pub fn pick(&mut self, id: BuildingId) -> Result<PickOutcome, WorkflowError> {
        if !self.arena.layout().contains(id) {
            return Err(WorkflowError::UnknownBuilding(id));
        }
        Ok(self.selection.pick(id))
    }

    fn leave_current_mode(&mut self) {
        self.workflow.abandon();
        self.workflow.reset();
        self.clear_route();
    }

    // -- route planning ---------------------------------------------------

    /// Submit the picked route. Matches show up after the transition
    /// effect, via `next_event`.
    pub fn submit_plan(&mut self) -> Result<(), WorkflowError> {
        let user = self.options.identity.clone().ok_or(WorkflowError::NoIdentity)?;
        let request = self.workflow.begin(&self.selection, self.arena.layout())?;
        info!(route = %request.route.to_wkt(), "submitting travel plan");
        tokio::spawn(drive_submission(
            self.api.clone(),
            user,
            request,
            self.options.transition,
            self.tx.clone(),
        ));
        Ok(())
    }

    /// Hide the revealed route and its matches.
    pub fn clear_route(&mut self) {
        self.active_route = None;
        self.matches.clear();
    }

    pub fn dismiss_matches(&mut self) {
        self.matches.clear();
        self.workflow.reset();
    }

    // -- errands ----------------------------------------------------------

    /// Post an errand between the picked pickup and dropoff buildings.
    /// The errand shows up through the broadcast or the refetch that
    /// follows success; nothing is inserted locally.
    pub fn submit_errand(&mut self, draft: ErrandDraft) -> Result<(), WorkflowError> {
        let user = self.options.identity.clone().ok_or(WorkflowError::NoIdentity)?;
        if self.errand_submission.is_some() {
            return Err(WorkflowError::InFlight);
        }
        let (category, pickup, dropoff) =
            self.selection.errand_picks().ok_or(WorkflowError::NotSubmittable)?;
        let layout = self.arena.layout();
        let pickup = layout.get(pickup).ok_or(WorkflowError::UnknownBuilding(pickup))?;
        let dropoff = layout.get(dropoff).ok_or(WorkflowError::UnknownBuilding(dropoff))?;

        let request = NewErrand {
            user_id: user,
            title: draft
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| self.options.default_errand_title.clone()),
            category,
            description: draft.description.filter(|d| !d.trim().is_empty()).unwrap_or_else(|| {
                format!("Deliver package from {} to {}", pickup.name, dropoff.name)
            }),
            pickup: pickup.planar(),
            dropoff: dropoff.planar(),
            reward_estimate: draft.reward.unwrap_or(self.options.default_reward),
        };

        let epoch = self.selection.epoch();
        self.errand_submission = Some(epoch);
        info!(category = %category, from = %pickup.id, to = %dropoff.id, "posting errand");

        let api = self.api.clone();
        self.spawn_call(async move {
            let result = api.create_errand(&request).await;
            Completion::ErrandCreated { epoch, result }
        });
        Ok(())
    }

    pub fn complete_errand(&mut self, id: ErrandId) {
        self.update_status(id, ErrandStatus::Completed);
    }

    pub fn cancel_errand(&mut self, id: ErrandId) {
        self.update_status(id, ErrandStatus::Cancelled);
    }

    fn update_status(&mut self, id: ErrandId, status: ErrandStatus) {
        debug!(errand = %id, status = %status, "updating errand status");
        let api = self.api.clone();
        self.spawn_call(async move {
            let result = api.update_errand_status(&id, status).await;
            Completion::StatusChanged { id, status, result }
        });
    }

    /// Pull the pending list. Only the newest refetch is applied.
    pub fn refresh_pending(&mut self) {
        self.pending_seq += 1;
        self.pending_changes = Some(InFlightChanges::new());
        let seq = self.pending_seq;
        let api = self.api.clone();
        self.spawn_call(async move {
            let result = api.get_pending_errands().await;
            Completion::PendingFetched { seq, result }
        });
    }

    pub fn refresh_profile(&mut self) {
        self.profile_seq += 1;
        let seq = self.profile_seq;
        let api = self.api.clone();
        self.spawn_call(async move {
            let result = api.get_profile().await;
            Completion::ProfileFetched { seq, result }
        });
    }

    // -- emergency --------------------------------------------------------

    /// Ask the server to raise or clear the alarm. Local state only changes
    /// when the broadcast comes back.
    pub fn trigger_emergency(&mut self, active: bool, message: impl Into<String>) {
        let request = EmergencyRequest {
            active,
            message: message.into(),
            target: if active {
                self.arena.layout().emergency_target()
            } else {
                None
            },
        };
        info!(active, target = ?request.target, "requesting emergency toggle");
        self.emergency.mark_requested(active);
        let api = self.api.clone();
        self.spawn_call(async move {
            let result = api.toggle_emergency(&request).await;
            Completion::EmergencySent { result }
        });
    }

    // -- chat -------------------------------------------------------------

    /// Open the conversation for `errand`, replacing any open one.
    pub fn open_chat(&mut self, errand: ErrandId) {
        let ticket = self.chat.bind(errand);
        let api = self.api.clone();
        self.spawn_call(async move {
            let result = api.get_chat_history(ticket.errand()).await;
            Completion::HistoryFetched { ticket, result }
        });
    }

    pub fn close_chat(&mut self) {
        self.chat.unbind();
    }

    /// Send a line to the open conversation. It appears once the server
    /// broadcasts it back.
    pub fn send_chat(&mut self, content: impl Into<String>) -> Result<(), WorkflowError> {
        let sender = self.options.identity.clone().ok_or(WorkflowError::NoIdentity)?;
        let errand = self.chat.bound().cloned().ok_or(WorkflowError::NoConversation)?;
        let content = content.into();
        let api = self.api.clone();
        self.spawn_call(async move {
            let result = api.send_message(&errand, &sender, &content).await;
            Completion::MessageSent { result }
        });
        Ok(())
    }

    // -- layout -----------------------------------------------------------

    /// Swap in a new building layout. Every held building id is dropped and
    /// any in-flight plan submission is abandoned.
    pub fn reconfigure(&mut self) -> u64 {
        let generation = self.arena.reconfigure();
        self.selection.invalidate();
        self.workflow.abandon();
        self.clear_route();
        generation
    }
}
