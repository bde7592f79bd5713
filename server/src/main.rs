mod config;
mod error;
mod match_handle;
mod routes;
mod scheduler;
mod ws;

use anyhow::Context;
use proto::ServerMessage;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::match_handle::{snapshot_to_wire, MatchHandle};
use crate::scheduler::Ticker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::load().context("loading config")?;
    let addr = config.listen_addr()?;
    let seed = config.seed.unwrap_or_else(rand::random);

    let match_handle = MatchHandle::new(config.game.clone(), seed);

    let initial = ServerMessage::GameState {
        data: snapshot_to_wire(&match_handle.snapshot().await),
    }
    .to_json()
    .context("encoding initial snapshot")?;
    let (frames_tx, frames_rx) = watch::channel(initial);

    let ticker = Ticker::spawn(match_handle.clone(), frames_tx);

    info!(%addr, seed, "pong server listening");
    warp::serve(routes::routes(match_handle, frames_rx))
        .run(addr)
        .await;

    ticker.stop();
    Ok(())
}
