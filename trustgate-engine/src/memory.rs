//! In-memory profile store.
//!
//! Profiles live in a map behind a single async `RwLock`. Each
//! reinforcement runs under the write lock, which makes it atomic with
//! respect to every other lookup and reinforcement.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use trustgate_core::{ClientId, Profile, Reinforcement};

use crate::{ProfileStore, StoreError};

/// Thread-safe map of provisioned profiles.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<ClientId, Profile>>,
}

impl InMemoryProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-provisioned with `profiles`.
    ///
    /// A later profile with the same client id replaces an earlier one.
    #[must_use]
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let map = profiles.into_iter().map(|p| (p.client_id.clone(), p)).collect();
        Self { profiles: RwLock::new(map) }
    }

    /// Provision or replace a profile. Returns the profile it replaced.
    pub async fn provision(&self, profile: Profile) -> Option<Profile> {
        self.profiles.write().await.insert(profile.client_id.clone(), profile)
    }

    /// Snapshot of the current profile for `client_id`.
    pub async fn get(&self, client_id: &ClientId) -> Option<Profile> {
        self.profiles.read().await.get(client_id).cloned()
    }

    /// Number of provisioned profiles.
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Returns `true` if nothing has been provisioned.
    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn lookup(&self, client_id: &ClientId) -> Result<Option<Profile>, StoreError> {
        Ok(self.get(client_id).await)
    }

    async fn reinforce(
        &self,
        client_id: &ClientId,
        reinforcement: &Reinforcement,
    ) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        match profiles.get_mut(client_id) {
            Some(profile) => profile.apply(reinforcement),
            None => {
                tracing::warn!(client = %client_id, "reinforce for unprovisioned client ignored");
            }
        }
        Ok(())
    }
}
