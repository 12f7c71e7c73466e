//! roomcast core: room addressing, wire payloads, and error types.
//!
//! This crate defines the contracts shared by the relay server and any
//! client tooling: validated room identifiers, purpose-scoped group keys,
//! the JSON payloads that cross the socket, and the error surface. It
//! carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `RoomcastError`/`Result` so the relay
//! process does not crash on malformed input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod group;
pub mod protocol;

/// Shared result type.
pub use error::{Result, RoomcastError};
pub use group::{GroupKey, Purpose, RoomId};
