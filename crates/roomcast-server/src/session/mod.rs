//! Per-connection session state machines.
//!
//! One session object per socket, single-use, driven sequentially by its
//! connection task. The transport guarantees `on_connect` once, then any
//! interleaving of `on_message` and `on_group_event`, then `on_disconnect`
//! exactly once on every exit path, including errors and timeouts.

mod chat;
mod presence;

use async_trait::async_trait;

use roomcast_core::error::Result;
use roomcast_core::protocol::event::GroupEvent;

pub use chat::ChatSession;
pub use presence::PresenceSession;

/// Lifecycle of a single-use session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Joining,
    Joined,
    Leaving,
}

/// What the transport drives. One implementor per endpoint kind.
#[async_trait]
pub trait SessionHandler: Send {
    /// Join the session's group and run any connect-time side effects.
    async fn on_connect(&mut self) -> Result<()>;

    /// One inbound text frame. Errors are session-fatal.
    async fn on_message(&mut self, text: &str) -> Result<()>;

    /// One event from the session's group. Returns the outbound frame when
    /// the event maps to one for this endpoint.
    fn on_group_event(&self, event: &GroupEvent) -> Result<Option<String>>;

    /// Must-run finalizer: leave, presence close-out, deregister. Safe to
    /// call on a session whose join never completed.
    async fn on_disconnect(&mut self);
}
