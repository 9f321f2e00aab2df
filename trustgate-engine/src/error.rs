//! Error types for the engine crate.

/// Errors surfaced by a [`ProfileStore`](crate::ProfileStore).
///
/// The evaluator returns these unchanged. They never turn into an allow or a
/// deny.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The store could not be reached or did not answer in time.
    #[error("profile store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    /// Shorthand for [`StoreError::Unavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable { reason: reason.into() }
    }
}
