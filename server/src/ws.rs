//! Per-connection WebSocket handling.

use futures_util::{SinkExt, StreamExt};
use proto::ClientMessage;
use tokio::sync::watch;
use tracing::debug;
use warp::ws::{Message, WebSocket};

use crate::match_handle::MatchHandle;

/// Runs for the lifetime of one client connection.
///
/// Outbound: a task that forwards the latest published frame; the watch
/// channel drops intermediate frames for a slow reader instead of queuing.
/// Inbound: commands are decoded and applied; malformed frames are logged at
/// debug and dropped. Disconnection simply ends both halves.
pub async fn client_connected(
    ws: WebSocket,
    match_handle: MatchHandle,
    mut frames: watch::Receiver<String>,
) {
    let (mut ws_tx, mut ws_rx) = ws.split();
    debug!("client connected");

    let send_task = tokio::spawn(async move {
        loop {
            let frame = frames.borrow_and_update().clone();
            if !frame.is_empty() && ws_tx.send(Message::text(frame)).await.is_err() {
                break;
            }
            if frames.changed().await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        let msg = match result {
            Ok(msg) => msg,
            Err(error) => {
                debug!(%error, "websocket error");
                break;
            }
        };
        let Ok(text) = msg.to_str() else {
            continue;
        };
        match ClientMessage::from_json(text) {
            Ok(command) => match_handle.apply(command).await,
            Err(error) => debug!(%error, text, "dropping malformed command"),
        }
    }

    send_task.abort();
    debug!("client disconnected");
}
