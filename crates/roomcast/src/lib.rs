//! Top-level facade crate for roomcast.
//!
//! Re-exports the core contracts and the server library so users can depend
//! on a single crate.

pub mod core {
    pub use roomcast_core::*;
}

pub mod server {
    pub use roomcast_server::*;
}
