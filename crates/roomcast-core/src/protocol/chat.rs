//! Chat wire payload.

use serde::{Deserialize, Serialize};

/// A relayed chat message. Same shape inbound and outbound: the relay
/// forwards both fields verbatim, including the client-claimed username.
///
/// Unknown extra fields are tolerated on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    pub username: String,
}
