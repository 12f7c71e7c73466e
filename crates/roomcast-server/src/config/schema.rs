use serde::Deserialize;

use roomcast_core::error::{Result, RoomcastError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub relay: RelaySection,
}

impl RelayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RoomcastError::InvalidConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.relay.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: u64,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            ping_interval_ms: default_ping_interval_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if !(5000..=120000).contains(&self.ping_interval_ms) {
            return Err(RoomcastError::InvalidConfig(
                "server.ping_interval_ms must be between 5000 and 120000".into(),
            ));
        }
        if !(10000..=600000).contains(&self.idle_timeout_ms) {
            return Err(RoomcastError::InvalidConfig(
                "server.idle_timeout_ms must be between 10000 and 600000".into(),
            ));
        }
        if self.idle_timeout_ms <= self.ping_interval_ms {
            return Err(RoomcastError::InvalidConfig(
                "server.idle_timeout_ms must be greater than ping_interval_ms".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaySection {
    /// Per-connection outbound queue depth (group events waiting for the
    /// socket writer).
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,

    /// How long a broadcast waits on one member's full queue before
    /// dropping that member's copy.
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            outbound_queue: default_outbound_queue(),
            send_timeout_ms: default_send_timeout_ms(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl RelaySection {
    pub fn validate(&self) -> Result<()> {
        if !(16..=65536).contains(&self.outbound_queue) {
            return Err(RoomcastError::InvalidConfig(
                "relay.outbound_queue must be between 16 and 65536".into(),
            ));
        }
        if !(10..=60000).contains(&self.send_timeout_ms) {
            return Err(RoomcastError::InvalidConfig(
                "relay.send_timeout_ms must be between 10 and 60000".into(),
            ));
        }
        if !(256..=1_048_576).contains(&self.max_frame_bytes) {
            return Err(RoomcastError::InvalidConfig(
                "relay.max_frame_bytes must be between 256 and 1048576".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_ping_interval_ms() -> u64 {
    20000
}
fn default_idle_timeout_ms() -> u64 {
    60000
}
fn default_outbound_queue() -> usize {
    256
}
fn default_send_timeout_ms() -> u64 {
    500
}
fn default_max_frame_bytes() -> usize {
    4096
}
