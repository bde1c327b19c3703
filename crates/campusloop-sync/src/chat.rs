//! Chat for the one errand conversation currently open.
//!
//! Each bind hands out a [`HistoryTicket`]; a history response is applied
//! only if its ticket is still the current one, so a slow fetch for an
//! abandoned conversation can never overwrite the active one. Sending
//! never appends locally: a line shows up once the server broadcasts it.

use campusloop_common::{ChatMessage, ErrandId};
use tracing::debug;

use crate::Disposition;

/// Proof of which bind a history fetch belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTicket {
    errand: ErrandId,
    generation: u64,
}

impl HistoryTicket {
    pub fn errand(&self) -> &ErrandId {
        &self.errand
    }
}

#[derive(Debug, Default)]
pub struct ChatSession {
    bound: Option<ErrandId>,
    generation: u64,
    messages: Vec<ChatMessage>,
    loading: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `errand`, clearing the current list. The caller fetches
    /// history with the returned ticket.
    pub fn bind(&mut self, errand: ErrandId) -> HistoryTicket {
        self.generation += 1;
        self.messages.clear();
        self.loading = true;
        self.bound = Some(errand.clone());
        debug!(errand = %errand, generation = self.generation, "chat bound");
        HistoryTicket {
            errand,
            generation: self.generation,
        }
    }

    pub fn unbind(&mut self) {
        self.generation += 1;
        self.bound = None;
        self.messages.clear();
        self.loading = false;
    }

    /// Replace the list with a fetched history if `ticket` is still current.
    pub fn apply_history(&mut self, ticket: &HistoryTicket, history: Vec<ChatMessage>) -> Disposition {
        if !self.is_current(ticket) {
            debug!(errand = %ticket.errand, "dropping stale chat history");
            return Disposition::Stale;
        }
        self.messages = history;
        self.loading = false;
        Disposition::Applied
    }

    /// The history fetch for `ticket` failed. Leaves the list as is.
    pub fn history_failed(&mut self, ticket: &HistoryTicket) -> Disposition {
        if !self.is_current(ticket) {
            return Disposition::Stale;
        }
        self.loading = false;
        Disposition::Applied
    }

    /// Append a live message if it belongs to the bound conversation.
    pub fn on_new_message(&mut self, message: ChatMessage) -> bool {
        match &self.bound {
            Some(errand) if *errand == message.errand_id => {
                self.messages.push(message);
                true
            }
            _ => false,
        }
    }

    pub fn bound(&self) -> Option<&ErrandId> {
        self.bound.as_ref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn is_current(&self, ticket: &HistoryTicket) -> bool {
        ticket.generation == self.generation && self.bound.as_ref() == Some(&ticket.errand)
    }
}
