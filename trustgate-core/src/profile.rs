use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ClientId;
use crate::observation::{Hour, Observation, Reinforcement};
use crate::trust::Signal;

/// The learned behavioral fingerprint of one client.
///
/// Profiles are provisioned outside this crate and only ever grow through
/// [`Profile::apply`]. Ordered sets keep the members unique and make the
/// serialized form stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Profile {
    /// The client this profile belongs to.
    pub client_id: ClientId,
    /// Devices previously reinforced for this client.
    #[serde(default)]
    pub known_device_ids: BTreeSet<String>,
    /// Network addresses previously reinforced for this client.
    #[serde(default)]
    pub known_client_ips: BTreeSet<String>,
    /// Resources previously reinforced for this client.
    #[serde(default)]
    pub known_target_urls: BTreeSet<String>,
    /// UTC hours during which this client usually shows up.
    #[serde(default)]
    pub common_hours: BTreeSet<Hour>,
    /// Time of the most recent reinforcement, `None` until the first one.
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
}

impl Profile {
    /// Create an empty profile for `client_id`.
    #[must_use]
    pub fn new(client_id: impl Into<ClientId>) -> Self {
        Self {
            client_id: client_id.into(),
            known_device_ids: BTreeSet::new(),
            known_client_ips: BTreeSet::new(),
            known_target_urls: BTreeSet::new(),
            common_hours: BTreeSet::new(),
            last_seen: None,
        }
    }

    #[must_use]
    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.known_device_ids.insert(device_id.into());
        self
    }

    #[must_use]
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.known_client_ips.insert(client_ip.into());
        self
    }

    #[must_use]
    pub fn with_target_url(mut self, target_url: impl Into<String>) -> Self {
        self.known_target_urls.insert(target_url.into());
        self
    }

    #[must_use]
    pub fn with_hour(mut self, hour: Hour) -> Self {
        self.common_hours.insert(hour);
        self
    }

    /// Returns `true` if the observation carries evidence for `signal`.
    ///
    /// Empty attribute values never match, even if an empty string somehow
    /// ended up in the profile.
    #[must_use]
    pub fn matches(&self, signal: Signal, observation: &Observation<'_>) -> bool {
        let request = observation.request;
        match signal {
            Signal::Device => contains_non_empty(&self.known_device_ids, &request.device_id),
            Signal::ClientIp => contains_non_empty(&self.known_client_ips, &request.client_ip),
            Signal::TargetUrl => contains_non_empty(&self.known_target_urls, &request.target_url),
            Signal::Hour => self.common_hours.contains(&observation.observed_hour),
        }
    }

    /// Merge a reinforcement into this profile.
    ///
    /// Set updates are unions, so applying the same reinforcement twice is a
    /// no-op apart from `last_seen`. Empty values are skipped. The hour is
    /// merged only when the reinforcement asks for it.
    pub fn apply(&mut self, reinforcement: &Reinforcement) {
        insert_non_empty(&mut self.known_device_ids, &reinforcement.device_id);
        insert_non_empty(&mut self.known_client_ips, &reinforcement.client_ip);
        insert_non_empty(&mut self.known_target_urls, &reinforcement.target_url);
        if reinforcement.learn_hour {
            self.common_hours.insert(reinforcement.hour);
        }
        self.last_seen = Some(reinforcement.now);
    }
}

fn contains_non_empty(set: &BTreeSet<String>, value: &str) -> bool {
    !value.is_empty() && set.contains(value)
}

fn insert_non_empty(set: &mut BTreeSet<String>, value: &str) {
    if !value.is_empty() && !set.contains(value) {
        set.insert(value.to_owned());
    }
}
