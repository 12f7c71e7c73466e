//! Group registry: who is subscribed where, and fan-out.
//!
//! Sessions talk to the trait; the in-process [`LocalRegistry`] backend can
//! be swapped for a broker-backed one without touching session code.

mod connections;
mod groups;
mod local;

use async_trait::async_trait;
use tokio::sync::mpsc;

use roomcast_core::protocol::event::GroupEvent;
use roomcast_core::GroupKey;

pub use connections::ConnId;
pub use local::LocalRegistry;

/// Inbox end handed to the connection task at registration.
pub type Inbox = mpsc::Receiver<GroupEvent>;

#[async_trait]
pub trait GroupRegistry: Send + Sync {
    /// Allocate a handle and its inbox. Happens before any join.
    async fn register(&self) -> (ConnId, Inbox);

    /// Release the handle: removed from every joined group, sender dropped.
    async fn deregister(&self, conn: ConnId);

    /// Idempotent; joining twice is one membership.
    async fn join(&self, group: &GroupKey, conn: ConnId);

    /// Idempotent; a no-op for non-members.
    async fn leave(&self, group: &GroupKey, conn: ConnId);

    /// Deliver to every current member's inbox. One member failing to
    /// accept never affects the others. Empty and unknown groups are
    /// no-ops.
    async fn broadcast(&self, group: &GroupKey, event: GroupEvent);
}
