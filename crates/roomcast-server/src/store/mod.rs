//! Presence store seam.
//!
//! Named sets of usernames, shared state a multi-process deployment would
//! put behind a network store. The trait is async and every method returns
//! `Result` so a remote backend can surface outages as `StoreUnavailable`
//! instead of pretending users went offline.

mod memory;

use async_trait::async_trait;

use roomcast_core::error::Result;
use roomcast_core::RoomId;

pub use memory::InMemoryPresenceStore;

#[async_trait]
pub trait PresenceStore: Send + Sync {
    /// Add `member` to `set`. Adding a present member is a no-op.
    async fn add_member(&self, set: &str, member: &str) -> Result<()>;

    /// Remove `member` from `set`. Removing an absent member is a no-op.
    async fn remove_member(&self, set: &str, member: &str) -> Result<()>;

    async fn is_member(&self, set: &str, member: &str) -> Result<bool>;
}

/// Name of the online-users set for one room. Per-room on purpose: rooms
/// must not observe each other's presence.
pub fn online_set(room: &RoomId) -> String {
    format!("online_users:{room}")
}
