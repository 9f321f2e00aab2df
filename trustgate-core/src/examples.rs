//! Example profiles demonstrating the schema.
//!
//! `c1` is a workstation user seen from one device and address during office
//! hours. `build-bot` is a CI runner that only ever hits the artifact store.

use crate::observation::Hour;
use crate::profile::Profile;

/// Returns the canonical example profiles.
///
/// # Panics
/// Never panics: all hours are hard-coded valid values.
#[must_use]
pub fn example_profiles() -> Vec<Profile> {
    let workstation = Profile::new("c1")
        .with_device("d1")
        .with_client_ip("1.2.3.4")
        .with_hour(hour(9));

    let mut build_bot = Profile::new("build-bot")
        .with_device("runner-07")
        .with_client_ip("10.20.0.7")
        .with_client_ip("10.20.0.8")
        .with_target_url("https://artifacts.internal/upload");
    for h in 0..24 {
        build_bot = build_bot.with_hour(hour(h));
    }

    vec![workstation, build_bot]
}

#[expect(clippy::unwrap_used, reason = "example hours are all below 24")]
fn hour(value: u8) -> Hour {
    Hour::new(value).unwrap()
}
