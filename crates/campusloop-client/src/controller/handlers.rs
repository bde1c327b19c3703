//! Channel handlers: decode a payload and queue it. Nothing is applied
//! inside a handler, so a handler never mutates state another handler is
//! reading.

use campusloop_common::{ChatMessage, Errand, ErrandRecord};
use campusloop_sync::protocol::{self, EmergencyPayload, MatchNotification, StatusUpdate};
use campusloop_sync::{kinds, EventChannel, HandlerId};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::events::{Broadcast, Inbound};

pub(super) fn register(channel: &mut EventChannel, tx: &UnboundedSender<Inbound>) -> Vec<(&'static str, HandlerId)> {
    vec![
        (
            kinds::NEW_ERRAND,
            forward::<ErrandRecord>(channel, tx, kinds::NEW_ERRAND, |r| {
                Broadcast::NewErrand(Errand::from(r))
            }),
        ),
        (
            kinds::ERRAND_STATUS_UPDATE,
            forward::<StatusUpdate>(channel, tx, kinds::ERRAND_STATUS_UPDATE, Broadcast::StatusUpdate),
        ),
        (
            kinds::EMERGENCY_STATE,
            forward::<EmergencyPayload>(channel, tx, kinds::EMERGENCY_STATE, |p| {
                Broadcast::Emergency(p.into())
            }),
        ),
        (
            kinds::NEW_MESSAGE,
            forward::<ChatMessage>(channel, tx, kinds::NEW_MESSAGE, Broadcast::Message),
        ),
        (
            kinds::MATCH_NOTIFICATION,
            forward::<MatchNotification>(channel, tx, kinds::MATCH_NOTIFICATION, |n| {
                Broadcast::Matched {
                    errand: n.errand.into(),
                    users: n.matched_user_ids,
                }
            }),
        ),
    ]
}

fn forward<T: DeserializeOwned + 'static>(
    channel: &mut EventChannel,
    tx: &UnboundedSender<Inbound>,
    kind: &'static str,
    wrap: impl Fn(T) -> Broadcast + Send + 'static,
) -> HandlerId {
    let tx = tx.clone();
    channel.on(kind, move |payload: &Value| {
        match protocol::decode::<T>(kind, payload) {
            Ok(value) => {
                let _ = tx.send(Inbound::Broadcast(wrap(value)));
            }
            Err(e) => warn!(error = %e, "dropping malformed event"),
        }
    })
}
