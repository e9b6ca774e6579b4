use anyhow::{Context, Result};
use clap::Parser;
use parley_server::{HeartbeatConfig, ServerConfig, serve};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "parley-server", about = "Signaling relay for peer-to-peer media")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "PARLEY_ADDR", default_value = "0.0.0.0:4000")]
    addr: SocketAddr,

    /// Browser origin allowed to open signaling sockets (`*` for any).
    #[arg(long, env = "PARLEY_ALLOWED_ORIGIN", default_value = "http://localhost:3000")]
    allowed_origin: String,

    #[arg(long, env = "PARLEY_PING_INTERVAL_MS", default_value_t = 3000)]
    ping_interval_ms: u64,

    #[arg(long, env = "PARLEY_PING_TIMEOUT_MS", default_value_t = 4000)]
    ping_timeout_ms: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            listen_addr: args.addr,
            allowed_origin: args.allowed_origin,
            heartbeat: HeartbeatConfig {
                ping_interval: Duration::from_millis(args.ping_interval_ms),
                ping_timeout: Duration::from_millis(args.ping_timeout_ms),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from(Args::parse());
    info!("Initializing signaling relay...");

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    serve(listener, config).await
}
