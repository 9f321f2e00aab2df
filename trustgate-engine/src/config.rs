//! Evaluator configuration.

use serde::{Deserialize, Serialize};
use trustgate_core::TrustThreshold;

/// Policy knobs supplied to a [`TrustEvaluator`](crate::TrustEvaluator) at
/// construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct EvaluatorConfig {
    /// Score at or above which a request is allowed. Defaults to 75.
    #[serde(default)]
    pub trust_threshold: TrustThreshold,

    /// Merge the observed hour into `common_hours` on reinforcement.
    ///
    /// Off by default: without it the hour signal can only come from
    /// provisioning, never from observed traffic.
    #[serde(default)]
    pub learn_common_hours: bool,
}

impl EvaluatorConfig {
    /// Config with the given threshold and hour learning off.
    #[must_use]
    pub fn new(trust_threshold: TrustThreshold) -> Self {
        Self { trust_threshold, learn_common_hours: false }
    }

    #[must_use]
    pub fn with_hour_learning(mut self, enabled: bool) -> Self {
        self.learn_common_hours = enabled;
        self
    }
}
