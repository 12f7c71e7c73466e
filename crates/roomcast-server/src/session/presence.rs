use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use roomcast_core::error::{Result, RoomcastError};
use roomcast_core::protocol::event::GroupEvent;
use roomcast_core::protocol::presence::{OnlineStatus, PresenceUpdate};
use roomcast_core::{GroupKey, RoomId};

use crate::online::OnlineTracker;
use crate::registry::{ConnId, GroupRegistry};

use super::{Phase, SessionHandler};

/// Presence endpoint session: subscribes to a room's status feed and
/// applies client-sent open/close updates to the store.
pub struct PresenceSession {
    registry: Arc<dyn GroupRegistry>,
    tracker: OnlineTracker,
    conn: ConnId,
    room: RoomId,
    group: GroupKey,
    /// Usernames announced open on this socket and not yet closed. Drained
    /// at disconnect so an abrupt drop cannot leak online entries.
    announced: HashSet<String>,
    phase: Phase,
}

impl PresenceSession {
    pub fn new(
        registry: Arc<dyn GroupRegistry>,
        tracker: OnlineTracker,
        conn: ConnId,
        room: RoomId,
    ) -> Self {
        let group = GroupKey::online_users(room.clone());
        Self {
            registry,
            tracker,
            conn,
            room,
            group,
            announced: HashSet::new(),
            phase: Phase::Disconnected,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[async_trait]
impl SessionHandler for PresenceSession {
    async fn on_connect(&mut self) -> Result<()> {
        if self.phase != Phase::Disconnected {
            return Err(RoomcastError::UnexpectedState("presence connect on a used session"));
        }
        self.phase = Phase::Joining;
        self.registry.join(&self.group, self.conn).await;
        self.phase = Phase::Joined;
        tracing::info!(room = %self.room, conn = %self.conn, "presence session joined");
        Ok(())
    }

    async fn on_message(&mut self, text: &str) -> Result<()> {
        if self.phase != Phase::Joined {
            return Err(RoomcastError::UnexpectedState("presence update outside Joined"));
        }
        let upd: PresenceUpdate = serde_json::from_str(text)
            .map_err(|e| RoomcastError::MalformedPayload(e.to_string()))?;
        if upd.connection_type.is_open() {
            self.tracker.mark_online(&self.room, &upd.username).await?;
            self.announced.insert(upd.username);
        } else {
            self.tracker.mark_offline(&self.room, &upd.username).await?;
            self.announced.remove(&upd.username);
        }
        Ok(())
    }

    fn on_group_event(&self, event: &GroupEvent) -> Result<Option<String>> {
        if self.phase != Phase::Joined {
            return Ok(None);
        }
        match event {
            GroupEvent::OnlineStatus { username, online } => {
                let out = OnlineStatus {
                    username: username.clone(),
                    online_status: *online,
                };
                let text = serde_json::to_string(&out)
                    .map_err(|e| RoomcastError::Internal(format!("encode status outbound: {e}")))?;
                Ok(Some(text))
            }
            GroupEvent::ChatMessage { .. } => Ok(None),
        }
    }

    async fn on_disconnect(&mut self) {
        if self.phase == Phase::Leaving {
            return;
        }
        self.phase = Phase::Leaving;
        self.registry.leave(&self.group, self.conn).await;
        // Whatever this socket declared open goes offline now.
        let gone: Vec<String> = self.announced.drain().collect();
        for username in gone {
            if let Err(e) = self.tracker.mark_offline(&self.room, &username).await {
                tracing::warn!(room = %self.room, user = %username, error = %e, "presence close-out failed");
            }
        }
        self.registry.deregister(self.conn).await;
        self.phase = Phase::Disconnected;
        tracing::info!(room = %self.room, conn = %self.conn, "presence session left");
    }
}
