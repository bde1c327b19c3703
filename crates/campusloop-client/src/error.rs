use campusloop_api::ApiError;
use campusloop_common::{BuildingId, CampusError};

/// Why a user action could not start.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    #[error("pick two different buildings first")]
    NotSubmittable,

    #[error("a submission is already in progress")]
    InFlight,

    #[error("building {0} is not in the current layout")]
    UnknownBuilding(BuildingId),

    #[error("no signed-in user")]
    NoIdentity,

    #[error("no conversation is open")]
    NoConversation,

    #[error(transparent)]
    Transport(#[from] ApiError),
}

impl From<WorkflowError> for CampusError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::Transport(api) => CampusError::Transport(api.to_string()),
            other => CampusError::Workflow(other.to_string()),
        }
    }
}
