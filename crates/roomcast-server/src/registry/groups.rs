use dashmap::{DashMap, DashSet};

use roomcast_core::GroupKey;

use super::connections::ConnId;

/// Membership both ways: `group -> handles`, `handle -> groups`.
#[derive(Default)]
pub(crate) struct GroupTable {
    members: DashMap<GroupKey, DashSet<ConnId>>,
    joined: DashMap<ConnId, DashSet<GroupKey>>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self {
            members: DashMap::new(),
            joined: DashMap::new(),
        }
    }

    pub fn insert(&self, group: &GroupKey, conn: ConnId) {
        self.members
            .entry(group.clone())
            .or_insert_with(DashSet::new)
            .insert(conn);

        self.joined
            .entry(conn)
            .or_insert_with(DashSet::new)
            .insert(group.clone());
    }

    pub fn remove(&self, group: &GroupKey, conn: ConnId) {
        if let Some(set) = self.members.get(group) {
            set.remove(&conn);
        }
        // Emptiness is re-checked under the shard write lock, so a join
        // racing this cleanup cannot be swept away with the entry.
        self.members.remove_if(group, |_, set| set.is_empty());

        if let Some(set) = self.joined.get(&conn) {
            set.remove(group);
        }
        self.joined.remove_if(&conn, |_, set| set.is_empty());
    }

    pub fn members_of(&self, group: &GroupKey) -> Vec<ConnId> {
        self.members
            .get(group)
            .map(|set| set.iter().map(|c| *c.key()).collect())
            .unwrap_or_default()
    }

    pub fn drop_conn(&self, conn: ConnId) {
        if let Some(groups) = self.joined.remove(&conn).map(|(_, v)| v) {
            for g in groups.iter() {
                let group = g.key();
                if let Some(set) = self.members.get(group) {
                    set.remove(&conn);
                }
                self.members.remove_if(group, |_, set| set.is_empty());
            }
        }
    }
}
