//! Handler registry keyed by event kind.

use std::collections::HashMap;

use serde_json::Value;

/// Identifies a registered handler for [`EventChannel::off`](super::EventChannel::off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

pub(crate) type Handler = Box<dyn Fn(&Value) + Send>;

#[derive(Default)]
pub(crate) struct HandlerRegistry {
    next_id: u64,
    handlers: HashMap<String, Vec<(HandlerId, Handler)>>,
}

impl HandlerRegistry {
    pub(crate) fn register(&mut self, kind: &str, handler: Handler) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        self.handlers
            .entry(kind.to_string())
            .or_default()
            .push((id, handler));
        id
    }

    pub(crate) fn unregister(&mut self, kind: &str, id: HandlerId) -> bool {
        let Some(list) = self.handlers.get_mut(kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(hid, _)| *hid != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.handlers.remove(kind);
        }
        removed
    }

    /// Invoke every handler for `kind` in registration order.
    pub(crate) fn dispatch(&self, kind: &str, payload: &Value) -> usize {
        match self.handlers.get(kind) {
            Some(list) => {
                for (_, handler) in list {
                    handler(payload);
                }
                list.len()
            }
            None => 0,
        }
    }

    pub(crate) fn count(&self, kind: &str) -> usize {
        self.handlers.get(kind).map_or(0, Vec::len)
    }
}
