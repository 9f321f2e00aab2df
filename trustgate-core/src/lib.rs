//! Core types for the trustgate behavioral trust policy engine.
//!
//! Defines the request observation, the stored client profile, trust scores
//! and thresholds, and the pure scoring function that ties them together.
//! Storage and evaluation live in `trustgate-engine`.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod examples;
pub mod id;
pub mod observation;
pub mod profile;
pub mod trust;

pub use error::CoreError;
pub use id::ClientId;
pub use observation::{AccessRequest, Hour, Observation, Reinforcement};
pub use profile::Profile;
pub use trust::{
    matched_signals, score, Decision, Signal, TrustScore, TrustThreshold, REINFORCEMENT_THRESHOLD,
    SIGNAL_WEIGHT,
};
