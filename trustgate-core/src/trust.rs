use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::observation::Observation;
use crate::profile::Profile;

/// Points contributed by each matching signal.
pub const SIGNAL_WEIGHT: u8 = 25;

/// Score at which an observation is strong enough to reinforce the profile.
///
/// Fixed, and independent of the caller-facing [`TrustThreshold`].
pub const REINFORCEMENT_THRESHOLD: TrustScore = TrustScore(50);

/// One independent piece of behavioral evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The device id is known for this client.
    Device,
    /// The client address is known for this client.
    ClientIp,
    /// The target resource is known for this client.
    TargetUrl,
    /// The request arrived during one of the client's common hours.
    Hour,
}

impl Signal {
    /// Every signal, in a fixed order. Scoring is order-independent.
    pub const ALL: [Signal; 4] =
        [Signal::Device, Signal::ClientIp, Signal::TargetUrl, Signal::Hour];
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::Device => "device",
            Signal::ClientIp => "client_ip",
            Signal::TargetUrl => "target_url",
            Signal::Hour => "hour",
        };
        f.write_str(name)
    }
}

/// A trust score: a multiple of [`SIGNAL_WEIGHT`] in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TrustScore(u8);

impl TrustScore {
    /// No evidence at all.
    pub const ZERO: Self = Self(0);
    /// Every signal matched.
    pub const MAX: Self = Self(100);

    /// Creates a `TrustScore` from a raw value.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidTrustScore`] if `value` is above 100 or not
    /// a multiple of [`SIGNAL_WEIGHT`].
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value > Self::MAX.0 || value % SIGNAL_WEIGHT != 0 {
            return Err(CoreError::InvalidTrustScore { value });
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` if this score should reinforce the profile.
    #[must_use]
    pub fn reinforces(self) -> bool {
        self >= REINFORCEMENT_THRESHOLD
    }
}

impl TryFrom<u8> for TrustScore {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TrustScore> for u8 {
    fn from(score: TrustScore) -> Self {
        score.0
    }
}

impl fmt::Display for TrustScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-facing score at or above which a request is allowed.
///
/// This is policy configuration supplied from outside; it has nothing to do
/// with [`REINFORCEMENT_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TrustThreshold(u8);

impl TrustThreshold {
    /// Threshold used when none is configured.
    pub const DEFAULT: Self = Self(75);

    /// Creates a threshold from a value in `0..=100`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidThreshold`] if `value` is above 100.
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value > TrustScore::MAX.0 {
            return Err(CoreError::InvalidThreshold { value });
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` if `score` is high enough to be allowed.
    #[must_use]
    pub fn admits(self, score: TrustScore) -> bool {
        score.0 >= self.0
    }
}

impl Default for TrustThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for TrustThreshold {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TrustThreshold> for u8 {
    fn from(threshold: TrustThreshold) -> Self {
        threshold.0
    }
}

/// Outcome of evaluating one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Decision {
    pub score: TrustScore,
    pub allowed: bool,
}

impl Decision {
    /// Decide on `score` against the caller's threshold.
    #[must_use]
    pub fn new(score: TrustScore, threshold: TrustThreshold) -> Self {
        Self { score, allowed: threshold.admits(score) }
    }

    /// The fail-closed outcome for a client without a profile.
    ///
    /// Denied even when the threshold is zero.
    #[must_use]
    pub const fn unknown_client() -> Self {
        Self { score: TrustScore::ZERO, allowed: false }
    }
}

/// Signals in `observation` that `profile` recognises.
pub fn matched_signals<'p>(
    profile: &'p Profile,
    observation: Observation<'p>,
) -> impl Iterator<Item = Signal> + 'p {
    Signal::ALL.into_iter().filter(move |signal| profile.matches(*signal, &observation))
}

/// Score an observation against a profile.
///
/// Each matching signal adds [`SIGNAL_WEIGHT`].
#[must_use]
pub fn score(profile: &Profile, observation: &Observation<'_>) -> TrustScore {
    let points = matched_signals(profile, *observation).fold(0u8, |acc, _| acc + SIGNAL_WEIGHT);
    TrustScore(points)
}
