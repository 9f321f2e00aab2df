//! Request-time evidence: what the caller supplies and what the evaluator observes.

use std::fmt;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::ClientId;

/// An hour of day in UTC, always in `0..=23`.
///
/// Deserialization goes through [`Hour::new`], so a stored profile can never
/// carry an out-of-range hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hour(u8);

impl Hour {
    /// Creates an `Hour` from a value in `0..=23`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidHour`] if `value` is 24 or more.
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value > 23 {
            return Err(CoreError::InvalidHour { value });
        }
        Ok(Self(value))
    }

    /// Returns the UTC hour of the given instant.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "Timelike::hour is always < 24")]
    pub fn of(at: &DateTime<Utc>) -> Self {
        Self(at.hour() as u8)
    }

    /// Returns the inner value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Hour {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00Z", self.0)
    }
}

/// Identifying attributes of one inbound request, as supplied by the caller.
///
/// All fields are opaque. Empty strings are accepted and simply never match
/// anything in a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct AccessRequest {
    /// Which profile to consult.
    pub client_id: ClientId,
    /// Network address the request came from.
    pub client_ip: String,
    /// Resource the request is trying to reach.
    pub target_url: String,
    /// Device the request claims to come from.
    pub device_id: String,
}

impl AccessRequest {
    /// Create a new access request.
    pub fn new(
        client_id: impl Into<ClientId>,
        client_ip: impl Into<String>,
        target_url: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_ip: client_ip.into(),
            target_url: target_url.into(),
            device_id: device_id.into(),
        }
    }
}

/// An [`AccessRequest`] together with the hour at which it was observed.
///
/// The hour comes from the evaluator's clock, never from the caller.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    /// The caller-supplied attributes.
    pub request: &'a AccessRequest,
    /// UTC hour at evaluation time.
    pub observed_hour: Hour,
}

impl<'a> Observation<'a> {
    #[must_use]
    pub fn new(request: &'a AccessRequest, observed_hour: Hour) -> Self {
        Self { request, observed_hour }
    }
}

/// Evidence handed to a profile store when an observation qualifies for
/// reinforcement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Reinforcement {
    pub device_id: String,
    pub client_ip: String,
    pub target_url: String,
    /// Hour at which the observation was made.
    pub hour: Hour,
    /// Whether `hour` should be merged into the profile's common hours.
    /// Off unless hour learning is explicitly enabled.
    pub learn_hour: bool,
    /// Becomes the profile's `last_seen`.
    pub now: DateTime<Utc>,
}

impl Reinforcement {
    /// Build the reinforcement for a qualifying observation.
    #[must_use]
    pub fn from_observation(
        observation: &Observation<'_>,
        now: DateTime<Utc>,
        learn_hour: bool,
    ) -> Self {
        Self {
            device_id: observation.request.device_id.clone(),
            client_ip: observation.request.client_ip.clone(),
            target_url: observation.request.target_url.clone(),
            hour: observation.observed_hour,
            learn_hour,
            now,
        }
    }
}
