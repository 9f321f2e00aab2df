//! Fuzz target: scoring arbitrary requests against the example profiles.
//!
//! The score must stay a multiple of 25 in `0..=100`, and reinforcing a
//! profile with the request must never lower the score of that request.

#![no_main]

use chrono::Utc;
use libfuzzer_sys::fuzz_target;
use trustgate_core::examples::example_profiles;
use trustgate_core::{score, AccessRequest, Hour, Observation, Reinforcement};

fuzz_target!(|data: &[u8]| {
    let Some((first, rest)) = data.split_first() else {
        return;
    };
    let Ok(hour) = Hour::new(first % 24) else {
        return;
    };
    let text = String::from_utf8_lossy(rest);
    let mut parts = text.splitn(3, '\n');
    let device = parts.next().unwrap_or_default();
    let ip = parts.next().unwrap_or_default();
    let url = parts.next().unwrap_or_default();

    for profile in example_profiles() {
        let request = AccessRequest::new(profile.client_id.clone(), ip, url, device);
        let observation = Observation::new(&request, hour);
        let before = score(&profile, &observation).value();
        assert!(before <= 100 && before % 25 == 0, "score {before} out of domain");

        let mut learned = profile.clone();
        learned.apply(&Reinforcement::from_observation(&observation, Utc::now(), true));
        assert!(score(&learned, &observation).value() >= before);
    }
});
