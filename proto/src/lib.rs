//! JSON wire protocol shared by the server and its clients.
//!
//! Every message is a tagged object: `{"type": "...", ...}`. Unknown or
//! malformed messages fail deserialization and are dropped by the caller.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerSlot {
    #[serde(rename = "player1")]
    Player1,
    #[serde(rename = "player2")]
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireMode {
    Pvp,
    Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WirePhase {
    Waiting,
    Playing,
    Paused,
    Finished,
}

/// Held directional input for one paddle. Replaces any previous state for
/// the sending player; both flags at once cancel out server-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleData {
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallData {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreData {
    pub player1: u8,
    pub player2: u8,
}

/// One authoritative snapshot as it travels over the wire.
///
/// Ball velocities are in distance per tick; clients multiply by the tick
/// rate when they need distance per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotData {
    pub tick: u64,
    pub player1: PaddleData,
    pub player2: PaddleData,
    pub ball: BallData,
    pub score: ScoreData,
    pub mode: WireMode,
    pub phase: WirePhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerSlot>,
}

/// Client to server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Input {
        player: PlayerSlot,
        input: InputFlags,
    },
    SetMode {
        mode: WireMode,
    },
    Reset,
    Start,
    Stop,
    Pause,
    Resume,
}

/// Server to client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    GameState { data: SnapshotData },
}

impl ClientMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SnapshotData {
        SnapshotData {
            tick: 42,
            player1: PaddleData { y: 250.0 },
            player2: PaddleData { y: 180.0 },
            ball: BallData {
                x: 390.0,
                y: 290.0,
                vx: 6.0,
                vy: -6.0,
            },
            score: ScoreData {
                player1: 3,
                player2: 1,
            },
            mode: WireMode::Pvp,
            phase: WirePhase::Playing,
            winner: None,
        }
    }

    #[test]
    fn test_input_message_wire_shape() {
        let msg = ClientMessage::from_json(
            r#"{"type":"input","player":"player1","input":{"up":true,"down":false}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::Input {
                player: PlayerSlot::Player1,
                input: InputFlags {
                    up: true,
                    down: false
                },
            }
        );
    }

    #[test]
    fn test_input_flags_default_false() {
        let msg = ClientMessage::from_json(
            r#"{"type":"input","player":"player2","input":{"up":true}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::Input {
                player: PlayerSlot::Player2,
                input: InputFlags {
                    up: true,
                    down: false
                },
            }
        );
    }

    #[test]
    fn test_set_mode_message() {
        let msg = ClientMessage::from_json(r#"{"type":"setMode","mode":"ai"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::SetMode {
                mode: WireMode::Ai
            }
        );
    }

    #[test]
    fn test_lifecycle_messages() {
        for (text, expected) in [
            (r#"{"type":"reset"}"#, ClientMessage::Reset),
            (r#"{"type":"start"}"#, ClientMessage::Start),
            (r#"{"type":"stop"}"#, ClientMessage::Stop),
            (r#"{"type":"pause"}"#, ClientMessage::Pause),
            (r#"{"type":"resume"}"#, ClientMessage::Resume),
        ] {
            assert_eq!(ClientMessage::from_json(text).unwrap(), expected);
        }
    }

    #[test]
    fn test_malformed_message_rejected() {
        assert!(ClientMessage::from_json("not json").is_err());
        assert!(ClientMessage::from_json(r#"{"type":"teleport"}"#).is_err());
        assert!(ClientMessage::from_json(r#"{"type":"input","player":"player3"}"#).is_err());
    }

    #[test]
    fn test_game_state_envelope() {
        let json = ServerMessage::GameState { data: snapshot() }.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "gameState");
        assert_eq!(value["data"]["ball"]["vx"], 6.0);
        assert_eq!(value["data"]["score"]["player1"], 3);
        assert_eq!(value["data"]["mode"], "pvp");
        assert_eq!(value["data"]["phase"], "playing");
        assert!(
            value["data"].get("winner").is_none(),
            "winner absent until the match finishes"
        );
    }

    #[test]
    fn test_winner_serialized_when_finished() {
        let mut snap = snapshot();
        snap.phase = WirePhase::Finished;
        snap.winner = Some(PlayerSlot::Player2);
        let json = ServerMessage::GameState { data: snap }.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"]["winner"], "player2");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let json = ServerMessage::GameState { data: snapshot() }.to_json().unwrap();
        let back = ServerMessage::from_json(&json).unwrap();
        assert_eq!(back, ServerMessage::GameState { data: snapshot() });
    }
}
