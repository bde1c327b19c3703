//! Client core for the CampusLoop map.
//!
//! [`CampusClient`] owns every piece of client state (layout, selection,
//! the plan workflow, the pending errand mirror, emergency and chat) and
//! is driven by one loop calling [`CampusClient::next_event`]. Network
//! calls run on spawned tasks and report back through the same queue as
//! channel broadcasts, so all state changes happen on the caller's task.

mod controller;
mod error;
mod events;
mod options;
pub mod workflow;

#[cfg(test)]
mod fake;

pub use controller::CampusClient;
pub use error::WorkflowError;
pub use events::ClientUpdate;
pub use options::{ClientOptions, ErrandDraft};
pub use workflow::{PlanPhase, PlanSubmissionWorkflow, Reveal};
