//! Fuzz target: JSON deserialization of `Profile`.
//!
//! Verifies that arbitrary bytes never panic the decoder and that any
//! profile that does decode only holds hours in `0..=23`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use trustgate_core::Profile;

fuzz_target!(|data: &[u8]| {
    let Ok(profile) = serde_json::from_slice::<Profile>(data) else {
        return;
    };
    assert!(
        profile.common_hours.iter().all(|h| h.value() <= 23),
        "decoded profile must never carry an out-of-range hour"
    );

    let json = serde_json::to_string(&profile).expect("Profile serialization must not fail");
    let again: Profile = serde_json::from_str(&json).expect("re-decoding must not fail");
    assert_eq!(profile, again);
});
