use async_trait::async_trait;
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::{timeout, Duration};

use roomcast_core::protocol::event::GroupEvent;
use roomcast_core::GroupKey;

use super::connections::ConnectionTable;
use super::groups::GroupTable;
use super::{ConnId, GroupRegistry, Inbox};

/// In-process registry backend: sharded maps, bounded inboxes.
///
/// `broadcast` snapshots the member set, then enqueues concurrently.
/// Enqueue time is the linearization point: a member that leaves while a
/// broadcast is in flight stops draining its inbox before the receiver
/// drops, so its client never observes a delivery after the leave.
pub struct LocalRegistry {
    conns: ConnectionTable,
    groups: GroupTable,
    send_timeout: Duration,
}

impl LocalRegistry {
    pub fn new(queue_depth: usize, send_timeout: Duration) -> Self {
        Self {
            conns: ConnectionTable::new(queue_depth),
            groups: GroupTable::new(),
            send_timeout,
        }
    }
}

#[async_trait]
impl GroupRegistry for LocalRegistry {
    async fn register(&self) -> (ConnId, Inbox) {
        self.conns.register()
    }

    async fn deregister(&self, conn: ConnId) {
        self.groups.drop_conn(conn);
        self.conns.deregister(conn);
    }

    async fn join(&self, group: &GroupKey, conn: ConnId) {
        self.groups.insert(group, conn);
    }

    async fn leave(&self, group: &GroupKey, conn: ConnId) {
        self.groups.remove(group, conn);
    }

    async fn broadcast(&self, group: &GroupKey, event: GroupEvent) {
        let members = self.groups.members_of(group);
        if members.is_empty() {
            return;
        }

        let mut futs = FuturesUnordered::new();
        for conn in members {
            let Some(tx) = self.conns.sender(conn) else { continue };
            let ev = event.clone();
            let wait = self.send_timeout;
            futs.push(async move {
                // Fast path, then a bounded wait if the member's queue is
                // full. A receiver that is gone or stays full past the
                // timeout costs only its own copy.
                match tx.try_send(ev) {
                    Ok(()) => {}
                    Err(TrySendError::Closed(_)) => {}
                    Err(TrySendError::Full(ev)) => {
                        if timeout(wait, tx.send(ev)).await.is_err() {
                            tracing::debug!(%conn, "fanout send timed out, dropping copy");
                        }
                    }
                }
            });
        }
        while futs.next().await.is_some() {}
    }
}
