//! In-memory `CampusApi` with scripted delays and failures.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use campusloop_api::{ApiError, CampusApi, EmergencyRequest, NewErrand, RouteGeometry};
use campusloop_common::{
    ChatMessage, Errand, ErrandId, ErrandStatus, Match, PlanId, Profile, UserId,
};

/// One scripted response.
#[derive(Debug, Clone)]
pub(crate) struct Scripted<T> {
    pub delay: Duration,
    pub result: Result<T, ApiError>,
}

impl<T> Scripted<T> {
    pub fn ok(value: T) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(value),
        }
    }

    pub fn err(error: ApiError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }

    pub fn after_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    async fn run(self) -> Result<T, ApiError> {
        tokio::time::sleep(self.delay).await;
        self.result
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreatePlan { user: UserId, wkt: String },
    GetMatches(PlanId),
    CreateErrand(NewErrand),
    Pending,
    Status(ErrandId, ErrandStatus),
    Emergency(EmergencyRequest),
    Profile,
    History(ErrandId),
    Send(ErrandId, UserId, String),
}

pub(crate) struct FakeState {
    pub plan: Scripted<PlanId>,
    pub matches: Scripted<Vec<Match>>,
    pub create_errand: Scripted<ErrandId>,
    /// Consumed front to back; `pending` answers once it is empty.
    pub pending_queue: VecDeque<Scripted<Vec<Errand>>>,
    pub pending: Scripted<Vec<Errand>>,
    pub status: Scripted<()>,
    pub emergency: Scripted<()>,
    pub profile: Scripted<Profile>,
    pub history: HashMap<ErrandId, Scripted<Vec<ChatMessage>>>,
    pub send: Scripted<()>,
    pub calls: Vec<Call>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            plan: Scripted::ok(PlanId::from("plan-1")),
            matches: Scripted::ok(Vec::new()),
            create_errand: Scripted::ok(ErrandId::from("errand-new")),
            pending_queue: VecDeque::new(),
            pending: Scripted::ok(Vec::new()),
            status: Scripted::ok(()),
            emergency: Scripted::ok(()),
            profile: Scripted::ok(Profile::default()),
            history: HashMap::new(),
            send: Scripted::ok(()),
            calls: Vec::new(),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn edit(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record<T>(&self, call: Call, pick: impl FnOnce(&mut FakeState) -> Scripted<T>) -> Scripted<T> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        pick(&mut state)
    }
}

#[async_trait]
impl CampusApi for FakeApi {
    async fn create_travel_plan(
        &self,
        user: &UserId,
        route: &RouteGeometry,
    ) -> Result<PlanId, ApiError> {
        let call = Call::CreatePlan {
            user: user.clone(),
            wkt: route.to_wkt(),
        };
        self.record(call, |s| s.plan.clone()).run().await
    }

    async fn get_matches(&self, plan: &PlanId) -> Result<Vec<Match>, ApiError> {
        self.record(Call::GetMatches(plan.clone()), |s| s.matches.clone())
            .run()
            .await
    }

    async fn create_errand(&self, errand: &NewErrand) -> Result<ErrandId, ApiError> {
        self.record(Call::CreateErrand(errand.clone()), |s| s.create_errand.clone())
            .run()
            .await
    }

    async fn get_pending_errands(&self) -> Result<Vec<Errand>, ApiError> {
        self.record(Call::Pending, |s| {
            s.pending_queue.pop_front().unwrap_or_else(|| s.pending.clone())
        })
        .run()
        .await
    }

    async fn update_errand_status(
        &self,
        id: &ErrandId,
        status: ErrandStatus,
    ) -> Result<(), ApiError> {
        self.record(Call::Status(id.clone(), status), |s| s.status.clone())
            .run()
            .await
    }

    async fn toggle_emergency(&self, request: &EmergencyRequest) -> Result<(), ApiError> {
        self.record(Call::Emergency(request.clone()), |s| s.emergency.clone())
            .run()
            .await
    }

    async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.record(Call::Profile, |s| s.profile.clone()).run().await
    }

    async fn get_chat_history(&self, errand: &ErrandId) -> Result<Vec<ChatMessage>, ApiError> {
        self.record(Call::History(errand.clone()), |s| {
            s.history
                .get(errand)
                .cloned()
                .unwrap_or_else(|| Scripted::ok(Vec::new()))
        })
        .run()
        .await
    }

    async fn send_message(
        &self,
        errand: &ErrandId,
        sender: &UserId,
        content: &str,
    ) -> Result<(), ApiError> {
        let call = Call::Send(errand.clone(), sender.clone(), content.to_string());
        self.record(call, |s| s.send.clone()).run().await
    }
}
