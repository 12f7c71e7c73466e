//! Room identifiers and purpose-scoped group keys.
//!
//! Every connection subscribes to exactly one group, derived from the room
//! it targets and the purpose of its endpoint. Purposes use disjoint key
//! spaces: the `:` separator is outside the room alphabet, so
//! `chat:<room>` and `online-users:<room>` can never collide, whatever the
//! room string is.

use std::fmt;

use crate::error::{Result, RoomcastError};

/// Upper bound on a rendered group key (purpose + separator + room).
pub const GROUP_KEY_MAX_LEN: usize = 100;

/// Longest purpose prefix is `online-users` (12 bytes) plus the separator.
pub const ROOM_MAX_LEN: usize = GROUP_KEY_MAX_LEN - 13;

/// What a group carries. One purpose per endpoint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    /// Relayed chat messages.
    Chat,
    /// Online/offline status notifications.
    OnlineUsers,
}

impl Purpose {
    /// Key prefix; stable, part of the registry addressing contract.
    pub fn as_str(self) -> &'static str {
        match self {
            Purpose::Chat => "chat",
            Purpose::OnlineUsers => "online-users",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated room identifier.
///
/// Construction goes through [`RoomId::parse`]; a value of this type is
/// guaranteed to be non-empty, ASCII `[A-Za-z0-9._-]`, and short enough
/// that any derived group key stays within [`GROUP_KEY_MAX_LEN`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// Validate a client-supplied room string.
    ///
    /// Rejections are `InvalidRoomIdentifier`; callers must refuse the
    /// connection before any group registration happens.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(RoomcastError::InvalidRoomIdentifier(
                "room must not be empty".into(),
            ));
        }
        if raw.len() > ROOM_MAX_LEN {
            return Err(RoomcastError::InvalidRoomIdentifier(format!(
                "room exceeds {ROOM_MAX_LEN} bytes"
            )));
        }
        if let Some(c) = raw.chars().find(|c| !is_room_char(*c)) {
            return Err(RoomcastError::InvalidRoomIdentifier(format!(
                "character {c:?} is not allowed"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_room_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Registry address: (purpose, room).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    purpose: Purpose,
    room: RoomId,
}

impl GroupKey {
    pub fn new(purpose: Purpose, room: RoomId) -> Self {
        Self { purpose, room }
    }

    /// Chat group for a room.
    pub fn chat(room: RoomId) -> Self {
        Self::new(Purpose::Chat, room)
    }

    /// Presence notification group for a room.
    pub fn online_users(room: RoomId) -> Self {
        Self::new(Purpose::OnlineUsers, room)
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.purpose, self.room)
    }
}
