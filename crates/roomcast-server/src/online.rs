//! Online status tracking.

use std::sync::Arc;

use roomcast_core::error::Result;
use roomcast_core::protocol::event::GroupEvent;
use roomcast_core::{GroupKey, RoomId};

use crate::registry::GroupRegistry;
use crate::store::{online_set, PresenceStore};

/// The one path that changes who is online.
///
/// Both session kinds route through here: presence connections for explicit
/// open/close updates, chat connections for their own connect and
/// disconnect. The store write always lands before the notification goes
/// out, so a subscriber that sees a status can trust the store to reflect
/// it. A store failure aborts before any notification.
#[derive(Clone)]
pub struct OnlineTracker {
    registry: Arc<dyn GroupRegistry>,
    store: Arc<dyn PresenceStore>,
}

impl OnlineTracker {
    pub fn new(registry: Arc<dyn GroupRegistry>, store: Arc<dyn PresenceStore>) -> Self {
        Self { registry, store }
    }

    pub async fn mark_online(&self, room: &RoomId, username: &str) -> Result<()> {
        self.store.add_member(&online_set(room), username).await?;
        self.notify(room, username, true).await;
        Ok(())
    }

    pub async fn mark_offline(&self, room: &RoomId, username: &str) -> Result<()> {
        self.store.remove_member(&online_set(room), username).await?;
        self.notify(room, username, false).await;
        Ok(())
    }

    async fn notify(&self, room: &RoomId, username: &str, online: bool) {
        let group = GroupKey::online_users(room.clone());
        let event = GroupEvent::OnlineStatus {
            username: username.to_string(),
            online,
        };
        self.registry.broadcast(&group, event).await;
    }
}
