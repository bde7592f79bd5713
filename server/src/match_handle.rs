//! Shared handle to the authoritative match.
//!
//! One mutex linearizes the ticker and every connection; each lock is held
//! only for the duration of a single mutation or snapshot read.

use std::sync::Arc;

use game_core::{Config, Events, MatchState, Mode, Phase, Side, Snapshot};
use proto::{
    BallData, ClientMessage, PaddleData, PlayerSlot, ScoreData, SnapshotData, WireMode, WirePhase,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Clone)]
pub struct MatchHandle {
    inner: Arc<Mutex<MatchState>>,
}

impl MatchHandle {
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MatchState::new(config, seed))),
        }
    }

    pub async fn tick(&self) {
        let mut state = self.inner.lock().await;
        if !state.tick() {
            return;
        }
        let events = state.events();
        if let Some(scorer) = events.goal {
            let score = state.snapshot().score;
            info!(?scorer, left = score.left, right = score.right, "goal");
        }
        if let Some(winner) = events.finished {
            info!(?winner, "match finished");
        }
    }

    pub async fn events(&self) -> Events {
        self.inner.lock().await.events()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn config(&self) -> Config {
        self.inner.lock().await.config().clone()
    }

    pub async fn wire_snapshot(&self) -> SnapshotData {
        snapshot_to_wire(&self.snapshot().await)
    }

    /// Dispatch one inbound WebSocket command.
    pub async fn apply(&self, msg: ClientMessage) {
        let mut state = self.inner.lock().await;
        match msg {
            ClientMessage::Input { player, input } => {
                state.set_input(side_for_slot(player), input.up, input.down);
            }
            ClientMessage::SetMode { mode } => {
                let mode = mode_for_wire(mode);
                state.set_mode(mode);
                debug!(?mode, "mode changed");
            }
            ClientMessage::Reset => state.reset(),
            ClientMessage::Start | ClientMessage::Resume => {
                if !state.set_phase(Phase::Playing) {
                    debug!(phase = ?state.phase(), "start/resume ignored");
                }
            }
            ClientMessage::Stop => {
                if !state.set_phase(Phase::Waiting) {
                    debug!(phase = ?state.phase(), "stop ignored");
                }
            }
            ClientMessage::Pause => {
                if !state.set_phase(Phase::Paused) {
                    debug!(phase = ?state.phase(), "pause ignored");
                }
            }
        }
    }

    /// Absolute paddle move from the admin surface. Err carries the reason;
    /// state is untouched on failure.
    pub async fn move_paddle(&self, slot: PlayerSlot, y: f32) -> Result<f32, String> {
        let mut state = self.inner.lock().await;
        state
            .move_paddle(side_for_slot(slot), y)
            .ok_or_else(|| "player2 is automated in ai mode".to_string())
    }

    pub async fn set_mode(&self, mode: WireMode) {
        self.inner.lock().await.set_mode(mode_for_wire(mode));
    }
}

fn side_for_slot(slot: PlayerSlot) -> Side {
    match slot {
        PlayerSlot::Player1 => Side::Left,
        PlayerSlot::Player2 => Side::Right,
    }
}

fn slot_for_side(side: Side) -> PlayerSlot {
    match side {
        Side::Left => PlayerSlot::Player1,
        Side::Right => PlayerSlot::Player2,
    }
}

fn mode_for_wire(mode: WireMode) -> Mode {
    match mode {
        WireMode::Pvp => Mode::Pvp,
        WireMode::Ai => Mode::VsAi,
    }
}

pub fn snapshot_to_wire(snap: &Snapshot) -> SnapshotData {
    SnapshotData {
        tick: snap.tick,
        player1: PaddleData {
            y: snap.left_paddle_y,
        },
        player2: PaddleData {
            y: snap.right_paddle_y,
        },
        ball: BallData {
            x: snap.ball_x,
            y: snap.ball_y,
            vx: snap.ball_vx,
            vy: snap.ball_vy,
        },
        score: ScoreData {
            player1: snap.score.left,
            player2: snap.score.right,
        },
        mode: match snap.mode {
            Mode::Pvp => WireMode::Pvp,
            Mode::VsAi => WireMode::Ai,
        },
        phase: match snap.phase {
            Phase::Waiting => WirePhase::Waiting,
            Phase::Playing => WirePhase::Playing,
            Phase::Paused => WirePhase::Paused,
            Phase::Finished => WirePhase::Finished,
        },
        winner: snap.winner.map(slot_for_side),
    }
}
