//! Trust evaluation for the trustgate policy engine.
//!
//! [`TrustEvaluator`] scores each access request against the client's stored
//! profile, reinforces the profile on strong matches and returns an
//! allow/deny [`Decision`](trustgate_core::Decision). Storage is reached only
//! through the [`ProfileStore`] trait and time only through [`Clock`].

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod clock;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod memory;
pub mod store;
pub mod timeout;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EvaluatorConfig;
pub use error::StoreError;
pub use evaluator::TrustEvaluator;
pub use memory::InMemoryProfileStore;
pub use store::ProfileStore;
pub use timeout::{TimeoutStore, DEFAULT_STORE_TIMEOUT};
