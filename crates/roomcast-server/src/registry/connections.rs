use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::mpsc;

use roomcast_core::protocol::event::GroupEvent;

/// Opaque per-connection identity. Allocated once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(u64);

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connection table: `handle -> inbox sender`.
pub(crate) struct ConnectionTable {
    senders: DashMap<ConnId, mpsc::Sender<GroupEvent>>,
    seq: AtomicU64,
    queue_depth: usize,
}

impl ConnectionTable {
    pub fn new(queue_depth: usize) -> Self {
        Self {
            senders: DashMap::new(),
            seq: AtomicU64::new(1),
            queue_depth,
        }
    }

    pub fn register(&self) -> (ConnId, mpsc::Receiver<GroupEvent>) {
        let id = ConnId(self.seq.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::channel(self.queue_depth);
        self.senders.insert(id, tx);
        (id, rx)
    }

    pub fn deregister(&self, id: ConnId) {
        self.senders.remove(&id);
    }

    pub fn sender(&self, id: ConnId) -> Option<mpsc::Sender<GroupEvent>> {
        self.senders.get(&id).map(|r| r.value().clone())
    }
}
