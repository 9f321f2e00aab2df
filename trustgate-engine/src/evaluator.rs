//! Trust evaluator: scores a request against the client's stored profile.
//!
//! For each request the evaluator:
//! 1. Looks up the client's profile (absent ⇒ zero trust, denied)
//! 2. Observes the current UTC hour from its clock
//! 3. Sums the matching signals into a score
//! 4. Reinforces the profile if the score reaches the reinforcement threshold
//! 5. Allows the request if the score reaches the caller's trust threshold

use trustgate_core::{matched_signals, AccessRequest, Decision, Hour, Observation, Reinforcement};

use crate::{Clock, EvaluatorConfig, ProfileStore, StoreError, SystemClock};

/// Stateless decision function over a [`ProfileStore`].
///
/// Holds no mutable state of its own, so a single evaluator can be shared
/// across any number of concurrent requests.
///
/// # Cancel Safety
/// Cancel safe as long as the store is: each store call either applies in
/// full or not at all.
pub struct TrustEvaluator<S: ProfileStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    config: EvaluatorConfig,
}

impl<S: ProfileStore> TrustEvaluator<S> {
    /// Create an evaluator reading wall-clock time.
    #[must_use]
    pub fn new(store: S, config: EvaluatorConfig) -> Self {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: ProfileStore, C: Clock> TrustEvaluator<S, C> {
    /// Create an evaluator with an explicit clock.
    #[must_use]
    pub fn with_clock(store: S, clock: C, config: EvaluatorConfig) -> Self {
        Self { store, clock, config }
    }

    /// Returns the store this evaluator consults.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the thresholds this evaluator decides with.
    #[must_use]
    pub fn config(&self) -> EvaluatorConfig {
        self.config
    }

    /// Evaluate one access request.
    ///
    /// A request without a client id, or for a client with no profile, gets
    /// [`Decision::unknown_client`] and never touches the profile. At most one
    /// reinforcement is issued per call, and only when the score reaches
    /// [`REINFORCEMENT_THRESHOLD`](trustgate_core::REINFORCEMENT_THRESHOLD).
    ///
    /// # Errors
    /// Returns the store's [`StoreError`] unchanged if either the lookup or
    /// the reinforcement fails. No decision is produced in that case.
    pub async fn evaluate(&self, request: &AccessRequest) -> Result<Decision, StoreError> {
        let client_id = &request.client_id;
        if client_id.is_empty() {
            tracing::info!("request without client id, denying");
            return Ok(Decision::unknown_client());
        }

        let profile = self.store.lookup(client_id).await.inspect_err(|e| {
            tracing::warn!(client = %client_id, error = %e, "profile lookup failed");
        })?;
        let Some(profile) = profile else {
            tracing::info!(client = %client_id, "unknown client, denying");
            return Ok(Decision::unknown_client());
        };

        let now = self.clock.now();
        let observation = Observation::new(request, Hour::of(&now));
        let score = trustgate_core::score(&profile, &observation);

        tracing::debug!(
            client = %client_id,
            hour = %observation.observed_hour,
            signals = ?matched_signals(&profile, observation).collect::<Vec<_>>(),
            "scored request"
        );

        let reinforced = score.reinforces();
        if reinforced {
            let reinforcement =
                Reinforcement::from_observation(&observation, now, self.config.learn_common_hours);
            self.store.reinforce(client_id, &reinforcement).await.inspect_err(|e| {
                tracing::warn!(client = %client_id, error = %e, "profile reinforcement failed");
            })?;
        }

        let decision = Decision::new(score, self.config.trust_threshold);
        tracing::info!(
            client = %client_id,
            score = %decision.score,
            allowed = decision.allowed,
            reinforced,
            "trust decision"
        );
        Ok(decision)
    }
}
