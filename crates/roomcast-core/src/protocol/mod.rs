//! Wire payloads and group events.
//!
//! Everything on the socket is a single UTF-8 JSON object per frame. The
//! external shapes (chat messages, presence updates, status notifications)
//! live next to the internal [`event::GroupEvent`] enum that the registry
//! fans out to group members.
//!
//! All parsers are panic-free: malformed input is reported as
//! `RoomcastError` so one hostile client cannot take the relay down.

pub mod chat;
pub mod event;
pub mod presence;
