//! Background socket task with fixed-delay reconnect.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::types::{ChannelSignal, ChannelStatus};

// ---------------------------------------------------------------------------
// Connection Loop
// ---------------------------------------------------------------------------

/// Connect, forward frames, and reconnect after `reconnect_delay` on any
/// closure or connect failure. Runs until `shutdown` fires or the
/// dispatcher side of `signal_tx` is dropped.
pub(crate) async fn connection_loop(
    url: String,
    reconnect_delay: Duration,
    connect_timeout: Duration,
    signal_tx: mpsc::Sender<ChannelSignal>,
    shutdown: CancellationToken,
) {
    let log_url = url.split('?').next().unwrap_or("").to_string();
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        info!(url = %log_url, attempt, "connecting event channel");

        let connect = tokio::time::timeout(connect_timeout, tokio_tungstenite::connect_async(url.as_str()));
        let outcome = tokio::select! {
            _ = shutdown.cancelled() => return,
            outcome = connect => outcome,
        };

        match outcome {
            Ok(Ok((mut ws_stream, _))) => {
                attempt = 0;
                if signal_tx
                    .send(ChannelSignal::Status(ChannelStatus::Connected))
                    .await
                    .is_err()
                {
                    return;
                }

                let reason = loop {
                    tokio::select! {
                        _ = shutdown.cancelled() => {
                            let _ = ws_stream.close(None).await;
                            return;
                        }
                        msg = ws_stream.next() => match msg {
                            Some(Ok(WsMessage::Text(text))) => {
                                if signal_tx.send(ChannelSignal::Frame(text.as_str().to_owned())).await.is_err() {
                                    return;
                                }
                            }
                            Some(Ok(WsMessage::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                                Ok(text) => {
                                    if signal_tx.send(ChannelSignal::Frame(text)).await.is_err() {
                                        return;
                                    }
                                }
                                Err(_) => warn!(len = bytes.len(), "dropping non-UTF-8 binary frame"),
                            },
                            Some(Ok(WsMessage::Close(frame))) => {
                                debug!(?frame, "close frame received");
                                break "closed by server";
                            }
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                warn!(error = %e, "event channel read error");
                                break "read error";
                            }
                            None => break "stream ended",
                        },
                    }
                };

                info!(reason, "event channel disconnected");
                if signal_tx
                    .send(ChannelSignal::Status(ChannelStatus::Disconnected))
                    .await
                    .is_err()
                {
                    return;
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "event channel connect failed");
            }
            Err(_elapsed) => {
                warn!(
                    timeout_ms = connect_timeout.as_millis() as u64,
                    "event channel connect timed out"
                );
            }
        }

        info!(
            delay_ms = reconnect_delay.as_millis() as u64,
            "reconnecting event channel"
        );
        tokio::select! {
            _ = shutdown.cancelled() => return,
            _ = tokio::time::sleep(reconnect_delay) => {}
        }
    }
}
