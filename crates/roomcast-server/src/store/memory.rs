use async_trait::async_trait;
use dashmap::{DashMap, DashSet};

use roomcast_core::error::Result;

use super::PresenceStore;

/// Single-process store backend: set name -> members.
#[derive(Default)]
pub struct InMemoryPresenceStore {
    sets: DashMap<String, DashSet<String>>,
}

impl InMemoryPresenceStore {
    pub fn new() -> Self {
        Self {
            sets: DashMap::new(),
        }
    }
}

#[async_trait]
impl PresenceStore for InMemoryPresenceStore {
    async fn add_member(&self, set: &str, member: &str) -> Result<()> {
        self.sets
            .entry(set.to_string())
            .or_insert_with(DashSet::new)
            .insert(member.to_string());
        Ok(())
    }

    async fn remove_member(&self, set: &str, member: &str) -> Result<()> {
        if let Some(members) = self.sets.get(set) {
            members.remove(member);
        }
        // Emptiness is re-checked under the shard write lock, so a
        // concurrent add keeps the entry alive.
        self.sets.remove_if(set, |_, members| members.is_empty());
        Ok(())
    }

    async fn is_member(&self, set: &str, member: &str) -> Result<bool> {
        Ok(self
            .sets
            .get(set)
            .map(|members| members.contains(member))
            .unwrap_or(false))
    }
}
