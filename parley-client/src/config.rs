use parley_core::IceServerConfig;

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:4000/ws";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket endpoint of the relay.
    pub server_url: String,
    pub display_name: Option<String>,
    pub ice_servers: Vec<IceServerConfig>,
    /// Initial capture flags.
    pub camera_enabled: bool,
    pub microphone_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            display_name: None,
            ice_servers: vec![IceServerConfig::default_stun()],
            camera_enabled: true,
            microphone_enabled: true,
        }
    }
}
