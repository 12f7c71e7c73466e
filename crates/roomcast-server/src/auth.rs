//! Ticket-based auth seam for the chat endpoint.
//!
//! Real identity infrastructure sits upstream; the relay only needs a
//! username at connect time. Tickets are single-use.

use dashmap::DashMap;

use roomcast_core::error::{Result, RoomcastError};

pub trait TicketAuth: Send + Sync {
    /// Resolve and invalidate a ticket, returning the username it was
    /// issued for.
    fn consume(&self, ticket: &str) -> Result<String>;
}

pub struct InMemoryTickets {
    tickets: DashMap<String, String>,
}

impl InMemoryTickets {
    pub fn new() -> Self {
        let this = Self {
            tickets: DashMap::new(),
        };
        this.tickets.insert("dev".into(), "dev".into());
        this
    }

    pub fn insert(&self, ticket: impl Into<String>, username: impl Into<String>) {
        self.tickets.insert(ticket.into(), username.into());
    }
}

impl Default for InMemoryTickets {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketAuth for InMemoryTickets {
    fn consume(&self, ticket: &str) -> Result<String> {
        self.tickets
            .remove(ticket)
            .map(|(_, username)| username)
            .ok_or(RoomcastError::AuthFailed)
    }
}
