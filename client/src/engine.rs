//! Client-side reconciliation between authoritative snapshots.
//!
//! Snapshots arrive at the broadcast rate; rendering runs faster. The engine
//! keeps the last rendered state and blends it toward each new snapshot over
//! the interpolation window, then projects the ball forward so bounces appear
//! locally before the confirming snapshot lands.

use game_core::{Ball, Config, Mode, Phase, Side};
use glam::Vec2;

use crate::prediction::project_ball;

/// Deep copy of one authoritative snapshot, in court coordinates with
/// per-tick velocities. The wire object is never aliased by rendering code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientSnapshot {
    pub tick: u64,
    pub left_paddle_y: f32,
    pub right_paddle_y: f32,
    pub ball_pos: Vec2,
    pub ball_vel: Vec2,
    pub score_left: u8,
    pub score_right: u8,
    pub mode: Mode,
    pub phase: Phase,
    pub winner: Option<Side>,
}

/// What the renderer draws this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub left_paddle_y: f32,
    pub right_paddle_y: f32,
    pub ball: Ball,
    pub score_left: u8,
    pub score_right: u8,
    pub mode: Mode,
    pub phase: Phase,
    pub winner: Option<Side>,
}

impl RenderState {
    fn from_snapshot(snap: &ClientSnapshot) -> Self {
        Self {
            left_paddle_y: snap.left_paddle_y,
            right_paddle_y: snap.right_paddle_y,
            ball: Ball::new(snap.ball_pos, snap.ball_vel),
            score_left: snap.score_left,
            score_right: snap.score_right,
            mode: snap.mode,
            phase: snap.phase,
            winner: snap.winner,
        }
    }
}

pub struct ReconciliationEngine {
    config: Config,
    authoritative: Option<ClientSnapshot>,
    received_at_ms: f64,
    interpolated: Option<RenderState>,
    predicted_left: Option<f32>,
    predicted_right: Option<f32>,
}

impl ReconciliationEngine {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            authoritative: None,
            received_at_ms: 0.0,
            interpolated: None,
            predicted_left: None,
            predicted_right: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn last_snapshot(&self) -> Option<&ClientSnapshot> {
        self.authoritative.as_ref()
    }

    /// Accept a new authoritative snapshot. Local paddle predictions are
    /// cleared; the authoritative value always wins.
    pub fn ingest(&mut self, snapshot: ClientSnapshot, now_ms: f64) {
        self.authoritative = Some(snapshot);
        self.received_at_ms = now_ms;
        self.predicted_left = None;
        self.predicted_right = None;
    }

    /// Record a locally predicted paddle position, shown until the next
    /// snapshot arrives. The right paddle only accepts predictions in PVP
    /// mode; while automated its position is authoritative-only.
    pub fn set_paddle_prediction(&mut self, side: Side, y: f32) {
        let clamped = self.config.clamp_paddle_y(y);
        match side {
            Side::Left => self.predicted_left = Some(clamped),
            Side::Right => {
                if self.mode() == Some(Mode::Pvp) {
                    self.predicted_right = Some(clamped);
                }
            }
        }
    }

    fn mode(&self) -> Option<Mode> {
        self.authoritative.as_ref().map(|s| s.mode)
    }

    /// Recompute the rendered state for the current frame.
    ///
    /// Inside the interpolation window, paddle and ball positions blend from
    /// the previously rendered state toward the snapshot; velocities are
    /// taken verbatim from the snapshot. The ball is then re-projected from
    /// the snapshot with the shared reflection rules. Once the window has
    /// elapsed the state snaps to the raw snapshot values.
    pub fn update(&mut self, now_ms: f64) -> Option<RenderState> {
        let auth = self.authoritative?;
        let elapsed_ms = (now_ms - self.received_at_ms) as f32;
        let window_ms = self.config.interpolation_window_ms;

        let mut state = match self.interpolated {
            Some(prev) if elapsed_ms < window_ms => {
                let factor = (elapsed_ms / window_ms).min(1.0);
                let mut state = RenderState {
                    left_paddle_y: lerp(prev.left_paddle_y, auth.left_paddle_y, factor),
                    right_paddle_y: lerp(prev.right_paddle_y, auth.right_paddle_y, factor),
                    ball: Ball::new(
                        Vec2::new(
                            lerp(prev.ball.pos.x, auth.ball_pos.x, factor),
                            lerp(prev.ball.pos.y, auth.ball_pos.y, factor),
                        ),
                        auth.ball_vel,
                    ),
                    ..RenderState::from_snapshot(&auth)
                };
                state.ball = project_ball(
                    auth.ball_pos,
                    auth.ball_vel,
                    elapsed_ms / 1000.0,
                    state.left_paddle_y,
                    state.right_paddle_y,
                    &self.config,
                );
                state
            }
            _ => RenderState::from_snapshot(&auth),
        };

        if let Some(y) = self.predicted_left {
            state.left_paddle_y = y;
        }
        if let Some(y) = self.predicted_right {
            state.right_paddle_y = y;
        }

        self.interpolated = Some(state);
        Some(state)
    }
}

fn lerp(start: f32, end: f32, factor: f32) -> f32 {
    start + (end - start) * factor
}
