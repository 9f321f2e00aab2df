//! Deadline adapter for slow or hung profile stores.

use std::time::Duration;

use async_trait::async_trait;
use trustgate_core::{ClientId, Profile, Reinforcement};

use crate::{ProfileStore, StoreError};

/// Default per-call deadline: 2 seconds.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);

/// Wraps a [`ProfileStore`] and fails any call that outlives a deadline.
///
/// An elapsed deadline surfaces as [`StoreError::Unavailable`], so a hung
/// store is reported as an outage rather than a policy denial.
#[derive(Debug, Clone)]
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: ProfileStore> TimeoutStore<S> {
    /// Wrap `inner` with the given per-call deadline.
    #[must_use]
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    fn elapsed(&self, operation: &str) -> StoreError {
        StoreError::unavailable(format!(
            "{operation} timed out after {}ms",
            self.timeout.as_millis()
        ))
    }
}

#[async_trait]
impl<S: ProfileStore> ProfileStore for TimeoutStore<S> {
    async fn lookup(&self, client_id: &ClientId) -> Result<Option<Profile>, StoreError> {
        tokio::time::timeout(self.timeout, self.inner.lookup(client_id))
            .await
            .map_err(|_| self.elapsed("lookup"))?
    }

    async fn reinforce(
        &self,
        client_id: &ClientId,
        reinforcement: &Reinforcement,
    ) -> Result<(), StoreError> {
        tokio::time::timeout(self.timeout, self.inner.reinforce(client_id, reinforcement))
            .await
            .map_err(|_| self.elapsed("reinforce"))?
    }
}
