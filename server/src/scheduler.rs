//! Fixed-rate tick task and snapshot fan-out.

use std::time::Duration;

use proto::ServerMessage;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use crate::match_handle::MatchHandle;

/// Drives the match at the configured tick rate and publishes encoded
/// snapshots at the (possibly lower) broadcast rate.
///
/// Snapshots go through a watch channel, so subscribers always read the
/// freshest frame and a slow connection can never stall the loop.
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(match_handle: MatchHandle, frames: watch::Sender<String>) -> Self {
        let handle = tokio::spawn(run(match_handle, frames));
        Self { handle }
    }

    /// Cancel the tick task. Pause and stop flow through the match phase,
    /// never through timer teardown; this is for process shutdown only.
    pub fn stop(self) {
        self.handle.abort();
    }
}

async fn run(match_handle: MatchHandle, frames: watch::Sender<String>) {
    let config = match_handle.config().await;
    let tick_ms = config.tick_interval_ms();
    let broadcast_ms = config.broadcast_interval_ms();

    let mut interval = tokio::time::interval(Duration::from_secs_f64(tick_ms as f64 / 1000.0));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut since_broadcast_ms = broadcast_ms;
    loop {
        interval.tick().await;
        match_handle.tick().await;

        since_broadcast_ms += tick_ms;
        if since_broadcast_ms >= broadcast_ms {
            since_broadcast_ms = 0.0;
            let data = match_handle.wire_snapshot().await;
            match (ServerMessage::GameState { data }).to_json() {
                Ok(frame) => {
                    trace!(tick = data.tick, "broadcast");
                    frames.send_replace(frame);
                }
                Err(error) => warn!(%error, "snapshot encoding failed"),
            }
        }
    }
}
