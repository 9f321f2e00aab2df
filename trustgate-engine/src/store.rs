//! Profile store abstraction trait.
//!
//! Lets the evaluator run against an in-memory map, a database adapter, or
//! a test double without changing the decision logic.

use std::sync::Arc;

use async_trait::async_trait;
use trustgate_core::{ClientId, Profile, Reinforcement};

use crate::StoreError;

/// Holds one behavioral profile per client.
///
/// Implementations must be `Send + Sync` so a single store can serve
/// concurrent evaluations. Timeouts and retries, if any, belong to the
/// implementation.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for `client_id`.
    ///
    /// Returns `Ok(None)` when no profile was ever provisioned for the client.
    /// A returned profile is always complete.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn lookup(&self, client_id: &ClientId) -> Result<Option<Profile>, StoreError>;

    /// Merge `reinforcement` into the profile for `client_id`.
    ///
    /// Must apply atomically: either the whole reinforcement becomes visible
    /// or none of it does. Reinforcing a client without a profile is a no-op.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn reinforce(
        &self,
        client_id: &ClientId,
        reinforcement: &Reinforcement,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: ProfileStore + ?Sized> ProfileStore for Arc<S> {
    async fn lookup(&self, client_id: &ClientId) -> Result<Option<Profile>, StoreError> {
        (**self).lookup(client_id).await
    }

    async fn reinforce(
        &self,
        client_id: &ClientId,
        reinforcement: &Reinforcement,
    ) -> Result<(), StoreError> {
        (**self).reinforce(client_id, reinforcement).await
    }
}
