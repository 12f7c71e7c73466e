//! Relay config loader (strict parsing).

pub mod schema;

use std::fs;

use roomcast_core::error::{Result, RoomcastError};

pub use schema::{RelayConfig, RelaySection, ServerSection};

pub fn load_from_file(path: &str) -> Result<RelayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RoomcastError::InvalidConfig(format!("read {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RelayConfig> {
    let cfg: RelayConfig = serde_yaml::from_str(s)
        .map_err(|e| RoomcastError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
