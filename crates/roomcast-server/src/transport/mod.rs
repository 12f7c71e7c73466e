//! Transport layer (WebSocket).
//!
//! Upgrade handlers validate what they can before accepting, then drive
//! the session state machine over the socket.

pub mod ws;
