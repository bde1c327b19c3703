//! Everything that can change client state, funnelled through one queue.

use campusloop_api::ApiError;
use campusloop_common::{
    ChatMessage, Errand, ErrandId, ErrandStatus, Match, PlanId, Profile, UserId,
};
use campusloop_sync::protocol::StatusUpdate;
use campusloop_sync::{ChannelStatus, EmergencySnapshot, HistoryTicket};

use crate::workflow::{PlanPhase, SubmissionTicket};

/// Queue item applied by [`CampusClient::next_event`](crate::CampusClient::next_event).
#[derive(Debug)]
pub(crate) enum Inbound {
    Broadcast(Broadcast),
    Completion(Completion),
}

/// A decoded channel event.
#[derive(Debug)]
pub(crate) enum Broadcast {
    NewErrand(Errand),
    StatusUpdate(StatusUpdate),
    Emergency(EmergencySnapshot),
    Message(ChatMessage),
    Matched {
        errand: Errand,
        users: Vec<UserId>,
    },
}

/// Result of a spawned outbound call.
#[derive(Debug)]
pub(crate) enum Completion {
    PlanCreated {
        ticket: SubmissionTicket,
        result: Result<PlanId, ApiError>,
    },
    GateElapsed {
        ticket: SubmissionTicket,
    },
    MatchesFetched {
        ticket: SubmissionTicket,
        result: Result<Vec<Match>, ApiError>,
    },
    ErrandCreated {
        epoch: u64,
        result: Result<ErrandId, ApiError>,
    },
    PendingFetched {
        seq: u64,
        result: Result<Vec<Errand>, ApiError>,
    },
    ProfileFetched {
        seq: u64,
        result: Result<Profile, ApiError>,
    },
    StatusChanged {
        id: ErrandId,
        status: ErrandStatus,
        result: Result<(), ApiError>,
    },
    EmergencySent {
        result: Result<(), ApiError>,
    },
    HistoryFetched {
        ticket: HistoryTicket,
        result: Result<Vec<ChatMessage>, ApiError>,
    },
    MessageSent {
        result: Result<(), ApiError>,
    },
}

/// What one call to `next_event` changed, for whoever renders the state.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientUpdate {
    Channel(ChannelStatus),
    Errands,
    Emergency,
    Chat,
    Profile,
    Plan(PlanPhase),
    /// An errand request was accepted by the server.
    ErrandPosted(ErrandId),
    /// A notice was raised and nothing else changed.
    Notice,
    /// A stale or redundant result was discarded.
    Nothing,
}
