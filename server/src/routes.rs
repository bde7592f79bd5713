//! HTTP and WebSocket routes.
//!
//! `GET /ws` upgrades to the realtime protocol. The admin surface is
//! `GET /gamestate`, `POST /move` and `POST /mode`, each answering
//! `{"success":...}` with a reason on failure and no state change.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use proto::{PlayerSlot, WireMode};

use crate::match_handle::MatchHandle;
use crate::ws;

#[derive(Debug, Deserialize)]
struct MoveBody {
    player: PlayerSlot,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct ModeBody {
    mode: WireMode,
}

#[derive(Debug, Serialize)]
struct ApiResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<WireMode>,
}

impl ApiResponse {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
            mode: None,
        }
    }

    fn ok_mode(mode: WireMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::ok()
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            mode: None,
        }
    }
}

pub fn routes(
    match_handle: MatchHandle,
    frames: watch::Receiver<String>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let websocket = {
        let match_handle = match_handle.clone();
        warp::path("ws")
            .and(warp::ws())
            .map(move |upgrade: warp::ws::Ws| {
                let match_handle = match_handle.clone();
                let frames = frames.clone();
                upgrade.on_upgrade(move |socket| ws::client_connected(socket, match_handle, frames))
            })
    };

    let gamestate = {
        let match_handle = match_handle.clone();
        warp::path("gamestate")
            .and(warp::get())
            .then(move || {
                let match_handle = match_handle.clone();
                async move { warp::reply::json(&match_handle.wire_snapshot().await) }
            })
    };

    let move_paddle = {
        let match_handle = match_handle.clone();
        warp::path("move")
            .and(warp::post())
            .and(warp::body::json())
            .then(move |body: MoveBody| {
                let match_handle = match_handle.clone();
                async move {
                    match match_handle.move_paddle(body.player, body.y).await {
                        Ok(_) => warp::reply::json(&ApiResponse::ok()),
                        Err(reason) => warp::reply::json(&ApiResponse::failure(reason)),
                    }
                }
            })
    };

    let set_mode = {
        let match_handle = match_handle.clone();
        warp::path("mode")
            .and(warp::post())
            .and(warp::body::json())
            .then(move |body: ModeBody| {
                let match_handle = match_handle.clone();
                async move {
                    match_handle.set_mode(body.mode).await;
                    warp::reply::json(&ApiResponse::ok_mode(body.mode))
                }
            })
    };

    websocket
        .or(gamestate)
        .or(move_paddle)
        .or(set_mode)
        .recover(handle_rejection)
}

/// Body and method rejections become structured failures instead of warp's
/// default error pages.
async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Rejection> {
    if rejection.is_not_found() {
        return Err(rejection);
    }
    let reply = warp::reply::json(&ApiResponse::failure("Invalid payload"));
    Ok(warp::reply::with_status(reply, StatusCode::BAD_REQUEST))
}
