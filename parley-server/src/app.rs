use crate::config::{HeartbeatConfig, ServerConfig};
use crate::error::ConfigError;
use crate::room::{Room, RoomDirectory};
use crate::signaling::{SignalingService, ws_handler};
use anyhow::Context;
use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

const ROOM_COMMAND_BUFFER: usize = 256;

/// Starts the room task over `directory` and returns the service sockets
/// talk to.
pub fn spawn_relay(directory: RoomDirectory, heartbeat: HeartbeatConfig) -> SignalingService {
    let (cmd_tx, cmd_rx) = mpsc::channel(ROOM_COMMAND_BUFFER);
    let service = SignalingService::new(cmd_tx, heartbeat);

    let room = Room::new(directory, cmd_rx, Arc::new(service.clone()));
    tokio::spawn(room.run());

    service
}

pub fn router(service: SignalingService, config: &ServerConfig) -> Result<Router, ConfigError> {
    let cors = if config.allowed_origin == "*" {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origin: HeaderValue =
            config
                .allowed_origin
                .parse()
                .map_err(|source| ConfigError::InvalidOrigin {
                    origin: config.allowed_origin.clone(),
                    source,
                })?;
        CorsLayer::new().allow_origin(origin)
    }
    .allow_methods([Method::GET, Method::POST]);

    Ok(Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(service))
}

/// Runs the relay on an already bound listener until the server stops.
pub async fn serve(listener: TcpListener, config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let service = spawn_relay(RoomDirectory::default(), config.heartbeat);
    let app = router(service, &config)?;

    let addr = listener.local_addr().context("listener has no local address")?;
    info!("listening on port {}", addr.port());

    axum::serve(listener, app)
        .await
        .context("signaling server stopped")?;
    Ok(())
}
