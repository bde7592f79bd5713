//! Wire message handling for the client.

use game_core::{Mode, Phase, Side};
use glam::Vec2;
use proto::{ClientMessage, InputFlags, PlayerSlot, ServerMessage, SnapshotData, WireMode, WirePhase};

use crate::engine::ClientSnapshot;

pub fn slot_for_side(side: Side) -> PlayerSlot {
    match side {
        Side::Left => PlayerSlot::Player1,
        Side::Right => PlayerSlot::Player2,
    }
}

pub fn side_for_slot(slot: PlayerSlot) -> Side {
    match slot {
        PlayerSlot::Player1 => Side::Left,
        PlayerSlot::Player2 => Side::Right,
    }
}

pub fn snapshot_from_wire(data: &SnapshotData) -> ClientSnapshot {
    ClientSnapshot {
        tick: data.tick,
        left_paddle_y: data.player1.y,
        right_paddle_y: data.player2.y,
        ball_pos: Vec2::new(data.ball.x, data.ball.y),
        ball_vel: Vec2::new(data.ball.vx, data.ball.vy),
        score_left: data.score.player1,
        score_right: data.score.player2,
        mode: match data.mode {
            WireMode::Pvp => Mode::Pvp,
            WireMode::Ai => Mode::VsAi,
        },
        phase: match data.phase {
            WirePhase::Waiting => Phase::Waiting,
            WirePhase::Playing => Phase::Playing,
            WirePhase::Paused => Phase::Paused,
            WirePhase::Finished => Phase::Finished,
        },
        winner: data.winner.map(side_for_slot),
    }
}

/// Parse one inbound frame. Unknown or malformed messages yield None; the
/// caller drops them and keeps rendering from the last snapshot.
pub fn handle_message(text: &str) -> Option<ClientSnapshot> {
    match ServerMessage::from_json(text) {
        Ok(ServerMessage::GameState { data }) => Some(snapshot_from_wire(&data)),
        Err(_) => None,
    }
}

pub fn input_message(side: Side, up: bool, down: bool) -> ClientMessage {
    ClientMessage::Input {
        player: slot_for_side(side),
        input: InputFlags { up, down },
    }
}

pub fn set_mode_message(mode: Mode) -> ClientMessage {
    ClientMessage::SetMode {
        mode: match mode {
            Mode::Pvp => WireMode::Pvp,
            Mode::VsAi => WireMode::Ai,
        },
    }
}
