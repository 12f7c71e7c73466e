//! Presence wire payloads.

use serde::{Deserialize, Serialize};

/// Client-declared connection transition. Anything other than the two
/// literals is a parse error, which the session treats as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Open,
    Close,
}

impl ConnectionType {
    pub fn is_open(self) -> bool {
        matches!(self, ConnectionType::Open)
    }
}

/// Inbound presence update: `{"username": ..., "connection_type": "open"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceUpdate {
    pub username: String,
    pub connection_type: ConnectionType,
}

/// Outbound status notification: `{"username": ..., "online_status": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineStatus {
    pub username: String,
    pub online_status: bool,
}
