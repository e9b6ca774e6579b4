use crate::error::ConfigError;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_millis(3000);
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_millis(4000);

/// Liveness probing of signaling sockets.
///
/// A ping goes out every `ping_interval`; a socket that has been silent for
/// `ping_interval + ping_timeout` is treated as disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    pub ping_interval: Duration,
    pub ping_timeout: Duration,
}

impl HeartbeatConfig {
    pub fn deadline(&self) -> Duration {
        self.ping_interval + self.ping_timeout
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            ping_interval: DEFAULT_PING_INTERVAL,
            ping_timeout: DEFAULT_PING_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Browser origin allowed by CORS; `*` allows any.
    pub allowed_origin: String,
    pub heartbeat: HeartbeatConfig,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heartbeat.ping_interval.is_zero() {
            return Err(ConfigError::ZeroPingInterval);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_owned(),
            heartbeat: HeartbeatConfig::default(),
        }
    }
}
