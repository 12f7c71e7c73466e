//! Group-addressed events.

use serde::{Deserialize, Serialize};

/// What the registry fans out to the members of a group.
///
/// Sessions dispatch on the variant with a plain `match` and convert the
/// event to their outbound wire shape. The serde form carries a `"type"`
/// tag so a broker-backed registry can move these between processes.
///
/// Purposes keep their key spaces disjoint, so a `ChatMessage` never
/// reaches an online-users group and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GroupEvent {
    /// One relayed chat line, username as claimed by the sender.
    ChatMessage { message: String, username: String },
    /// A username went online (`status: true`) or offline (`status: false`).
    OnlineStatus {
        username: String,
        #[serde(rename = "status")]
        online: bool,
    },
}
