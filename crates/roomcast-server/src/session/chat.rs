use std::sync::Arc;

use async_trait::async_trait;

use roomcast_core::error::{Result, RoomcastError};
use roomcast_core::protocol::chat::ChatMessage;
use roomcast_core::protocol::event::GroupEvent;
use roomcast_core::{GroupKey, RoomId};

use crate::online::OnlineTracker;
use crate::registry::{ConnId, GroupRegistry};

use super::{Phase, SessionHandler};

/// Chat endpoint session: member of the room's chat group, relays inbound
/// payloads to it verbatim, and surfaces the authenticated user through
/// the presence path on connect and disconnect.
pub struct ChatSession {
    registry: Arc<dyn GroupRegistry>,
    tracker: OnlineTracker,
    conn: ConnId,
    room: RoomId,
    username: String,
    group: GroupKey,
    phase: Phase,
}

impl ChatSession {
    pub fn new(
        registry: Arc<dyn GroupRegistry>,
        tracker: OnlineTracker,
        conn: ConnId,
        room: RoomId,
        username: String,
    ) -> Self {
        let group = GroupKey::chat(room.clone());
        Self {
            registry,
            tracker,
            conn,
            room,
            username,
            group,
            phase: Phase::Disconnected,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[async_trait]
impl SessionHandler for ChatSession {
    async fn on_connect(&mut self) -> Result<()> {
        if self.phase != Phase::Disconnected {
            return Err(RoomcastError::UnexpectedState("chat connect on a used session"));
        }
        self.phase = Phase::Joining;
        self.registry.join(&self.group, self.conn).await;
        self.phase = Phase::Joined;
        // The authenticated user is online for this room for as long as
        // the socket lives.
        self.tracker.mark_online(&self.room, &self.username).await?;
        tracing::info!(room = %self.room, user = %self.username, conn = %self.conn, "chat session joined");
        Ok(())
    }

    async fn on_message(&mut self, text: &str) -> Result<()> {
        if self.phase != Phase::Joined {
            return Err(RoomcastError::UnexpectedState("chat message outside Joined"));
        }
        let msg: ChatMessage = serde_json::from_str(text)
            .map_err(|e| RoomcastError::MalformedPayload(e.to_string()))?;
        // The claimed username relays verbatim; identity is the presence
        // lane's concern.
        self.registry
            .broadcast(
                &self.group,
                GroupEvent::ChatMessage {
                    message: msg.message,
                    username: msg.username,
                },
            )
            .await;
        Ok(())
    }

    fn on_group_event(&self, event: &GroupEvent) -> Result<Option<String>> {
        if self.phase != Phase::Joined {
            return Ok(None);
        }
        match event {
            GroupEvent::ChatMessage { message, username } => {
                let out = ChatMessage {
                    message: message.clone(),
                    username: username.clone(),
                };
                let text = serde_json::to_string(&out)
                    .map_err(|e| RoomcastError::Internal(format!("encode chat outbound: {e}")))?;
                Ok(Some(text))
            }
            // Disjoint key spaces keep status events off chat groups.
            GroupEvent::OnlineStatus { .. } => Ok(None),
        }
    }

    async fn on_disconnect(&mut self) {
        if self.phase == Phase::Leaving {
            return;
        }
        self.phase = Phase::Leaving;
        self.registry.leave(&self.group, self.conn).await;
        // Close-out runs even when join never completed; the store and the
        // registry both treat absent members as no-ops.
        if let Err(e) = self.tracker.mark_offline(&self.room, &self.username).await {
            tracing::warn!(room = %self.room, user = %self.username, error = %e, "presence close-out failed");
        }
        self.registry.deregister(self.conn).await;
        self.phase = Phase::Disconnected;
        tracing::info!(room = %self.room, user = %self.username, conn = %self.conn, "chat session left");
    }
}
