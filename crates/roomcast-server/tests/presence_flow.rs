//! Store-then-notify behaviour of the online tracker.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::Duration;

use roomcast_core::error::{Result, RoomcastError};
use roomcast_core::protocol::event::GroupEvent;
use roomcast_core::{GroupKey, RoomId};
use roomcast_server::online::OnlineTracker;
use roomcast_server::registry::{GroupRegistry, LocalRegistry};
use roomcast_server::store::{online_set, InMemoryPresenceStore, PresenceStore};

fn room(s: &str) -> RoomId {
    RoomId::parse(s).unwrap()
}

fn setup() -> (Arc<LocalRegistry>, Arc<InMemoryPresenceStore>, OnlineTracker) {
    let registry = Arc::new(LocalRegistry::new(16, Duration::from_millis(200)));
    let store = Arc::new(InMemoryPresenceStore::new());
    let tracker = OnlineTracker::new(registry.clone(), store.clone());
    (registry, store, tracker)
}

#[tokio::test]
async fn mark_online_mutates_store_before_notifying() {
    let (registry, store, tracker) = setup();
    let lobby = room("lobby");

    let (sub, mut sub_rx) = registry.register().await;
    registry.join(&GroupKey::online_users(lobby.clone()), sub).await;

    tracker.mark_online(&lobby, "bob").await.unwrap();

    // The subscriber observed the notification; the store must already
    // reflect it.
    assert_eq!(
        sub_rx.try_recv().unwrap(),
        GroupEvent::OnlineStatus {
            username: "bob".into(),
            online: true,
        }
    );
    assert!(store.is_member(&online_set(&lobby), "bob").await.unwrap());
}

#[tokio::test]
async fn mark_offline_removes_and_notifies() {
    let (registry, store, tracker) = setup();
    let lobby = room("lobby");

    let (sub, mut sub_rx) = registry.register().await;
    registry.join(&GroupKey::online_users(lobby.clone()), sub).await;

    tracker.mark_online(&lobby, "bob").await.unwrap();
    tracker.mark_offline(&lobby, "bob").await.unwrap();

    assert_eq!(
        sub_rx.try_recv().unwrap(),
        GroupEvent::OnlineStatus {
            username: "bob".into(),
            online: true,
        }
    );
    assert_eq!(
        sub_rx.try_recv().unwrap(),
        GroupEvent::OnlineStatus {
            username: "bob".into(),
            online: false,
        }
    );
    assert!(!store.is_member(&online_set(&lobby), "bob").await.unwrap());
}

#[tokio::test]
async fn online_sets_are_per_room() {
    let (registry, store, tracker) = setup();
    let lobby = room("lobby");
    let ops = room("ops");

    let (sub, mut sub_rx) = registry.register().await;
    registry.join(&GroupKey::online_users(ops.clone()), sub).await;

    tracker.mark_online(&lobby, "bob").await.unwrap();

    // Different room: no store entry, no notification.
    assert!(!store.is_member(&online_set(&ops), "bob").await.unwrap());
    assert_eq!(sub_rx.try_recv().unwrap_err(), TryRecvError::Empty);
}

#[tokio::test]
async fn store_membership_is_a_plain_set() {
    let (_registry, store, _tracker) = setup();

    store.add_member("online_users:lobby", "bob").await.unwrap();
    store.add_member("online_users:lobby", "bob").await.unwrap();
    store.remove_member("online_users:lobby", "bob").await.unwrap();
    // No refcounting: one remove undoes any number of adds.
    assert!(!store.is_member("online_users:lobby", "bob").await.unwrap());

    // Removing an absent member is a no-op.
    store.remove_member("online_users:lobby", "ghost").await.unwrap();
}

struct DownStore;

#[async_trait::async_trait]
impl PresenceStore for DownStore {
    async fn add_member(&self, _set: &str, _member: &str) -> Result<()> {
        Err(RoomcastError::StoreUnavailable("store offline".into()))
    }

    async fn remove_member(&self, _set: &str, _member: &str) -> Result<()> {
        Err(RoomcastError::StoreUnavailable("store offline".into()))
    }

    async fn is_member(&self, _set: &str, _member: &str) -> Result<bool> {
        Err(RoomcastError::StoreUnavailable("store offline".into()))
    }
}

#[tokio::test]
async fn store_outage_surfaces_and_suppresses_the_notification() {
    let registry = Arc::new(LocalRegistry::new(16, Duration::from_millis(200)));
    let tracker = OnlineTracker::new(registry.clone(), Arc::new(DownStore));
    let lobby = room("lobby");

    let (sub, mut sub_rx) = registry.register().await;
    registry.join(&GroupKey::online_users(lobby.clone()), sub).await;

    let err = tracker.mark_online(&lobby, "bob").await.expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "STORE_UNAVAILABLE");

    // Mutation failed, so nothing may be announced.
    assert_eq!(sub_rx.try_recv().unwrap_err(), TryRecvError::Empty);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn set_cleanup_never_sweeps_a_racing_add() {
    // Removing the last member deletes the set entry. If another user is
    // added at the same moment, that add must survive the cleanup no
    // matter how the two interleave.
    let store = Arc::new(InMemoryPresenceStore::new());

    for _ in 0..500 {
        store.add_member("online_users:lobby", "bob").await.unwrap();

        let remove = {
            let store = store.clone();
            tokio::spawn(async move { store.remove_member("online_users:lobby", "bob").await })
        };
        let add = {
            let store = store.clone();
            tokio::spawn(async move { store.add_member("online_users:lobby", "carol").await })
        };
        let (removed, added) = tokio::join!(remove, add);
        removed.unwrap().unwrap();
        added.unwrap().unwrap();

        assert!(store.is_member("online_users:lobby", "carol").await.unwrap());
        store.remove_member("online_users:lobby", "carol").await.unwrap();
    }
}
