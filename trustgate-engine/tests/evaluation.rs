//! Integration tests: trust decisions against an in-memory profile store.
//!
//! Every test pins the clock at 09:xx UTC so the hour signal is
//! deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use trustgate_core::examples::example_profiles;
use trustgate_core::{
    AccessRequest, ClientId, Decision, Hour, Profile, Reinforcement, TrustScore, TrustThreshold,
};
use trustgate_engine::{
    EvaluatorConfig, FixedClock, InMemoryProfileStore, ProfileStore, StoreError, TrustEvaluator,
};

/// Counts reinforcements on top of an in-memory store.
#[derive(Default)]
struct RecordingStore {
    inner: InMemoryProfileStore,
    reinforcements: AtomicUsize,
}

impl RecordingStore {
    fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        Self {
            inner: InMemoryProfileStore::with_profiles(profiles),
            reinforcements: AtomicUsize::new(0),
        }
    }

    fn reinforcements(&self) -> usize {
        self.reinforcements.load(Ordering::SeqCst)
    }

    async fn profile(&self, id: &str) -> Profile {
        self.inner
            .get(&ClientId::new(id))
            .await
            .unwrap_or_else(|| panic!("profile {id} must exist"))
    }
}

#[async_trait]
impl ProfileStore for RecordingStore {
    async fn lookup(&self, client_id: &ClientId) -> Result<Option<Profile>, StoreError> {
        self.inner.lookup(client_id).await
    }

    async fn reinforce(
        &self,
        client_id: &ClientId,
        reinforcement: &Reinforcement,
    ) -> Result<(), StoreError> {
        self.reinforcements.fetch_add(1, Ordering::SeqCst);
        self.inner.reinforce(client_id, reinforcement).await
    }
}

fn nine_am() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 9, 15, 0)
        .single()
        .expect("valid timestamp")
}

fn hour(value: u8) -> Hour {
    Hour::new(value).expect("valid hour")
}

fn threshold(value: u8) -> TrustThreshold {
    TrustThreshold::new(value).expect("valid threshold")
}

/// Profile with one known value per signal; the hour is 09.
fn full_profile() -> Profile {
    Profile::new("c1")
        .with_device("d1")
        .with_client_ip("1.2.3.4")
        .with_target_url("/reports")
        .with_hour(hour(9))
}

fn evaluator_at_nine(
    store: Arc<RecordingStore>,
    config: EvaluatorConfig,
) -> TrustEvaluator<Arc<RecordingStore>, Arc<FixedClock>> {
    TrustEvaluator::with_clock(store, Arc::new(FixedClock::new(nine_am())), config)
}

#[tokio::test]
async fn unknown_client_scores_zero_and_never_reinforces() {
    let store = Arc::new(RecordingStore::with_profiles(example_profiles()));
    let evaluator = evaluator_at_nine(Arc::clone(&store), EvaluatorConfig::default());
    let request = AccessRequest::new("nobody", "1.2.3.4", "x", "d1");

    let decision = evaluator.evaluate(&request).await.expect("evaluate");

    assert_eq!(decision, Decision::unknown_client());
    assert_eq!(store.reinforcements(), 0, "unknown client must never reinforce");
    assert!(store.inner.get(&ClientId::new("nobody")).await.is_none());
    assert_eq!(store.inner.len().await, 2, "store must be unchanged");
}

#[tokio::test]
async fn unknown_client_is_denied_even_at_threshold_zero() {
    let store = Arc::new(RecordingStore::default());
    let evaluator = evaluator_at_nine(store, EvaluatorConfig::new(threshold(0)));
    let request = AccessRequest::new("nobody", "", "", "");

    let decision = evaluator.evaluate(&request).await.expect("evaluate");
    assert!(!decision.allowed, "unknown clients are never trusted");
}

#[tokio::test]
async fn known_client_scenario_scores_75_and_learns_url() {
    let store = Arc::new(RecordingStore::with_profiles(example_profiles()));
    let evaluator = evaluator_at_nine(Arc::clone(&store), EvaluatorConfig::new(threshold(75)));
    let request = AccessRequest::new("c1", "1.2.3.4", "x", "d1");

    let decision = evaluator.evaluate(&request).await.expect("evaluate");

    assert_eq!(decision.score.value(), 75, "device + ip + hour, url unknown");
    assert!(decision.allowed);
    assert_eq!(store.reinforcements(), 1);

    let profile = store.profile("c1").await;
    assert!(profile.known_target_urls.contains("x"), "url must be learned");
    assert_eq!(profile.last_seen, Some(nine_am()));
}

#[tokio::test]
async fn all_signals_match_scores_100() {
    let store = Arc::new(RecordingStore::with_profiles([full_profile()]));
    let evaluator = evaluator_at_nine(store, EvaluatorConfig::default());
    let request = AccessRequest::new("c1", "1.2.3.4", "/reports", "d1");

    let decision = evaluator.evaluate(&request).await.expect("evaluate");
    assert_eq!(decision.score, TrustScore::MAX);
}

#[tokio::test]
async fn device_and_ip_only_scores_50() {
    let mut profile = full_profile();
    profile.common_hours.clear();
    let store = Arc::new(RecordingStore::with_profiles([profile]));
    let evaluator = evaluator_at_nine(Arc::clone(&store), EvaluatorConfig::default());
    let request = AccessRequest::new("c1", "1.2.3.4", "/elsewhere", "d1");

    let decision = evaluator.evaluate(&request).await.expect("evaluate");
    assert_eq!(decision.score.value(), 50);
    assert!(!decision.allowed, "50 is below the default threshold of 75");
    assert_eq!(store.reinforcements(), 1, "50 reaches the reinforcement threshold");
}

#[tokio::test]
async fn reinforcement_fires_only_from_50() {
    // The request carries a value for every signal; each profile knows a
    // different subset of them.
    let request = AccessRequest::new("c1", "1.2.3.4", "/reports", "d1");
    let cases: [(Profile, u8, bool); 5] = [
        (Profile::new("c1"), 0, false),
        (Profile::new("c1").with_device("d1"), 25, false),
        (Profile::new("c1").with_device("d1").with_client_ip("1.2.3.4"), 50, true),
        (
            Profile::new("c1")
                .with_device("d1")
                .with_client_ip("1.2.3.4")
                .with_target_url("/reports"),
            75,
            true,
        ),
        (full_profile(), 100, true),
    ];

    for (profile, expected_score, fires) in cases {
        let store = Arc::new(RecordingStore::with_profiles([profile]));
        let evaluator = evaluator_at_nine(Arc::clone(&store), EvaluatorConfig::default());

        let decision = evaluator.evaluate(&request).await.expect("evaluate");

        assert_eq!(decision.score.value(), expected_score);
        assert_eq!(
            store.reinforcements(),
            usize::from(fires),
            "score {expected_score} reinforcement mismatch"
        );
    }
}

#[tokio::test]
async fn weak_match_leaves_profile_untouched() {
    let original = Profile::new("c1").with_device("d1");
    let store = Arc::new(RecordingStore::with_profiles([original.clone()]));
    let evaluator = evaluator_at_nine(Arc::clone(&store), EvaluatorConfig::default());
    let request = AccessRequest::new("c1", "5.5.5.5", "/new", "d1");

    let decision = evaluator.evaluate(&request).await.expect("evaluate");

    assert_eq!(decision.score.value(), 25);
    assert_eq!(store.profile("c1").await, original, "score 25 must not mutate");
}

#[tokio::test]
async fn repeated_reinforcement_is_idempotent_and_advances_last_seen() {
    let store = Arc::new(RecordingStore::with_profiles(example_profiles()));
    let clock = Arc::new(FixedClock::new(nine_am()));
    let evaluator = TrustEvaluator::with_clock(
        Arc::clone(&store),
        Arc::clone(&clock),
        EvaluatorConfig::default(),
    );
    let request = AccessRequest::new("c1", "1.2.3.4", "x", "d1");

    evaluator.evaluate(&request).await.expect("first evaluate");
    let first = store.profile("c1").await;

    clock.advance(Duration::minutes(10));
    evaluator.evaluate(&request).await.expect("second evaluate");
    let second = store.profile("c1").await;

    assert_eq!(first.known_device_ids.len(), second.known_device_ids.len());
    assert_eq!(first.known_client_ips.len(), second.known_client_ips.len());
    assert_eq!(first.known_target_urls.len(), second.known_target_urls.len());
    assert!(second.last_seen > first.last_seen, "last_seen must advance");
    assert_eq!(store.reinforcements(), 2);
}

#[tokio::test]
async fn reinforcement_does_not_learn_hour_by_default() {
    let profile = Profile::new("c1").with_device("d1").with_client_ip("1.2.3.4");
    let store = Arc::new(RecordingStore::with_profiles([profile]));
    let evaluator = evaluator_at_nine(Arc::clone(&store), EvaluatorConfig::default());
    let request = AccessRequest::new("c1", "1.2.3.4", "x", "d1");

    evaluator.evaluate(&request).await.expect("evaluate");

    assert!(store.profile("c1").await.common_hours.is_empty());
}

#[tokio::test]
async fn reinforcement_learns_hour_when_enabled() {
    let profile = Profile::new("c1").with_device("d1").with_client_ip("1.2.3.4");
    let store = Arc::new(RecordingStore::with_profiles([profile]));
    let config = EvaluatorConfig::default().with_hour_learning(true);
    let evaluator = evaluator_at_nine(Arc::clone(&store), config);
    let request = AccessRequest::new("c1", "1.2.3.4", "x", "d1");

    let first = evaluator.evaluate(&request).await.expect("first evaluate");
    let second = evaluator.evaluate(&request).await.expect("second evaluate");

    assert!(store.profile("c1").await.common_hours.contains(&hour(9)));
    assert_eq!(first.score.value(), 50);
    assert_eq!(second.score.value(), 100, "url and hour now known");
}

#[tokio::test]
async fn trust_threshold_is_independent_of_reinforcement_threshold() {
    let request = AccessRequest::new("c1", "1.2.3.4", "x", "d1");

    for (value, allowed) in [(50, true), (75, true), (100, false)] {
        let store = Arc::new(RecordingStore::with_profiles(example_profiles()));
        let config = EvaluatorConfig::new(threshold(value));
        let evaluator = evaluator_at_nine(Arc::clone(&store), config);

        let decision = evaluator.evaluate(&request).await.expect("evaluate");

        assert_eq!(decision.score.value(), 75);
        assert_eq!(decision.allowed, allowed, "threshold {value}");
        assert_eq!(store.reinforcements(), 1, "reinforcement ignores the trust threshold");
    }
}

#[tokio::test]
async fn empty_fields_never_match_and_never_fail() {
    let profile = Profile::new("c1").with_device("d1").with_hour(hour(3));
    let store = Arc::new(RecordingStore::with_profiles([profile]));
    let evaluator = evaluator_at_nine(Arc::clone(&store), EvaluatorConfig::default());
    let request = AccessRequest::new("c1", "", "", "");

    let decision = evaluator.evaluate(&request).await.expect("evaluate");

    assert_eq!(decision.score, TrustScore::ZERO);
    assert_eq!(store.reinforcements(), 0);
}
