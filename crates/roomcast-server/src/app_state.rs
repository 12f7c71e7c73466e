//! Shared application state for the relay.

use std::sync::Arc;

use tokio::time::Duration;

use crate::auth::{InMemoryTickets, TicketAuth};
use crate::config::RelayConfig;
use crate::online::OnlineTracker;
use crate::registry::{GroupRegistry, LocalRegistry};
use crate::store::{InMemoryPresenceStore, PresenceStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: RelayConfig,
    registry: Arc<dyn GroupRegistry>,
    store: Arc<dyn PresenceStore>,
    tracker: OnlineTracker,
    tickets: Arc<dyn TicketAuth>,
}

impl AppState {
    pub fn new(cfg: RelayConfig) -> Self {
        let registry: Arc<dyn GroupRegistry> = Arc::new(LocalRegistry::new(
            cfg.relay.outbound_queue,
            Duration::from_millis(cfg.relay.send_timeout_ms),
        ));
        let store: Arc<dyn PresenceStore> = Arc::new(InMemoryPresenceStore::new());
        let tracker = OnlineTracker::new(Arc::clone(&registry), Arc::clone(&store));
        let tickets: Arc<dyn TicketAuth> = Arc::new(InMemoryTickets::new());
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                store,
                tracker,
                tickets,
            }),
        }
    }

    pub fn cfg(&self) -> &RelayConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<dyn GroupRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn store(&self) -> Arc<dyn PresenceStore> {
        Arc::clone(&self.inner.store)
    }

    pub fn tracker(&self) -> OnlineTracker {
        self.inner.tracker.clone()
    }

    pub fn tickets(&self) -> Arc<dyn TicketAuth> {
        Arc::clone(&self.inner.tickets)
    }
}
