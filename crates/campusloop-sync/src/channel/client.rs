//! Public handle for the live event channel.

use campusloop_common::UserId;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::connection::connection_loop;
use super::registry::{HandlerId, HandlerRegistry};
use super::types::{ChannelSignal, ChannelStatus, EventChannelConfig};
use crate::protocol::Envelope;

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Owner of the single push connection.
///
/// The socket lives in a background task; frames are handed back over a
/// queue and dispatched to handlers from [`EventChannel::next_status`], so
/// handlers always run on the consumer's task, one at a time.
pub struct EventChannel {
    config: EventChannelConfig,
    registry: HandlerRegistry,
    signal_rx: Option<mpsc::Receiver<ChannelSignal>>,
    shutdown: Option<CancellationToken>,
    connected: bool,
}

impl EventChannel {
    pub fn new(config: EventChannelConfig) -> Self {
        Self {
            config,
            registry: HandlerRegistry::default(),
            signal_rx: None,
            shutdown: None,
            connected: false,
        }
    }

    /// Start the connection task. A second call while the task is running
    /// is a no-op and returns `false`.
    pub fn connect(&mut self, identity: Option<&UserId>) -> bool {
        if self.signal_rx.is_some() {
            debug!("event channel already running");
            return false;
        }

        let (signal_tx, signal_rx) = mpsc::channel(self.config.signal_buffer.max(1));
        let shutdown = CancellationToken::new();
        tokio::spawn(connection_loop(
            self.config.connection_url(identity),
            self.config.reconnect_delay,
            self.config.connect_timeout,
            signal_tx,
            shutdown.clone(),
        ));

        self.signal_rx = Some(signal_rx);
        self.shutdown = Some(shutdown);
        true
    }

    /// Stop the connection task. Handlers stay registered.
    pub fn disconnect(&mut self) {
        if let Some(token) = self.shutdown.take() {
            info!("event channel shutting down");
            token.cancel();
        }
        self.signal_rx = None;
        self.connected = false;
    }

    /// Register `handler` for `kind`. Handlers for one kind run in
    /// registration order.
    pub fn on(&mut self, kind: &str, handler: impl Fn(&Value) + Send + 'static) -> HandlerId {
        self.registry.register(kind, Box::new(handler))
    }

    /// Unregister a handler. Returns `false` if it was not registered.
    pub fn off(&mut self, kind: &str, id: HandlerId) -> bool {
        self.registry.unregister(kind, id)
    }

    pub fn handler_count(&self, kind: &str) -> usize {
        self.registry.count(kind)
    }

    /// Whether the last observed status was `Connected`.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether the connection task has been started and not stopped.
    pub fn is_running(&self) -> bool {
        self.signal_rx.is_some()
    }

    /// Dispatch frames until the connection status changes, then return it.
    ///
    /// Never resolves while the channel is not running, so it can sit in a
    /// `select!` next to other event sources.
    pub async fn next_status(&mut self) -> Option<ChannelStatus> {
        let Some(rx) = self.signal_rx.as_mut() else {
            return std::future::pending().await;
        };

        loop {
            match rx.recv().await {
                Some(ChannelSignal::Frame(text)) => {
                    dispatch_frame(&self.registry, &text);
                }
                Some(ChannelSignal::Status(status)) => {
                    self.connected = status == ChannelStatus::Connected;
                    return Some(status);
                }
                None => {
                    warn!("event channel task ended");
                    self.signal_rx = None;
                    self.shutdown = None;
                    self.connected = false;
                    return None;
                }
            }
        }
    }

    /// Parse one frame and run its handlers. Malformed frames are logged
    /// and dropped. Returns the number of handlers invoked.
    pub fn dispatch_text(&self, text: &str) -> usize {
        dispatch_frame(&self.registry, text)
    }

    pub fn dispatch(&self, envelope: &Envelope) -> usize {
        dispatch_envelope(&self.registry, envelope)
    }
}

fn dispatch_frame(registry: &HandlerRegistry, text: &str) -> usize {
    match Envelope::parse(text) {
        Ok(envelope) => dispatch_envelope(registry, &envelope),
        Err(e) => {
            warn!(error = %e, "dropping malformed frame");
            0
        }
    }
}

fn dispatch_envelope(registry: &HandlerRegistry, envelope: &Envelope) -> usize {
    let invoked = registry.dispatch(&envelope.kind, &envelope.payload);
    if invoked == 0 {
        debug!(kind = %envelope.kind, "no handlers for event");
    }
    invoked
}

impl Drop for EventChannel {
    fn drop(&mut self) {
        if let Some(token) = self.shutdown.take() {
            token.cancel();
        }
    }
}
