//! roomcast server library entry.
//!
//! This crate wires the transport, group registry, presence store, and the
//! two session kinds into a runnable relay. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod online;
pub mod registry;
pub mod router;
pub mod session;
pub mod store;
pub mod transport;
