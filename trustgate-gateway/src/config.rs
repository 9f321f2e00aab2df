//! Gateway configuration, read from the environment at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use trustgate_core::{Profile, TrustThreshold};
use trustgate_engine::{EvaluatorConfig, DEFAULT_STORE_TIMEOUT};

/// Listen address used when `TRUSTGATE_LISTEN_ADDR` is unset.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Errors raised while loading gateway configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An environment variable held a value that could not be used.
    #[error("invalid {var}={value:?}: {reason}")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// The profiles file could not be read.
    #[error("failed to read profiles from {}: {source}", .path.display())]
    ProfilesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The profiles file is not a JSON array of valid profiles.
    #[error("failed to parse profiles from {}: {source}", .path.display())]
    ProfilesParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the gateway binary needs to start.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Address to bind, `TRUSTGATE_LISTEN_ADDR`.
    pub listen_addr: String,
    /// Threshold and hour learning, `TRUST_THRESHOLD` and `TRUSTGATE_LEARN_HOURS`.
    pub evaluator: EvaluatorConfig,
    /// Per-call store deadline, `TRUSTGATE_STORE_TIMEOUT_MS`.
    pub store_timeout: Duration,
    /// JSON file of profiles to provision at startup, `TRUSTGATE_PROFILES`.
    pub profiles_path: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
            evaluator: EvaluatorConfig::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
            profiles_path: None,
        }
    }
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidVar`] if a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// or `None` if it is unset.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidVar`] if a variable is set to an
    /// unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(addr) = lookup("TRUSTGATE_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Some(value) = lookup("TRUST_THRESHOLD") {
            let threshold = value
                .trim()
                .parse::<u8>()
                .map_err(|e| e.to_string())
                .and_then(|v| TrustThreshold::new(v).map_err(|e| e.to_string()))
                .map_err(|reason| ConfigError::InvalidVar {
                    var: "TRUST_THRESHOLD",
                    value: value.clone(),
                    reason,
                })?;
            config.evaluator.trust_threshold = threshold;
        }

        if let Some(value) = lookup("TRUSTGATE_LEARN_HOURS") {
            let enabled = value.trim().parse::<bool>().map_err(|e| ConfigError::InvalidVar {
                var: "TRUSTGATE_LEARN_HOURS",
                value: value.clone(),
                reason: e.to_string(),
            })?;
            config.evaluator = config.evaluator.with_hour_learning(enabled);
        }

        if let Some(value) = lookup("TRUSTGATE_STORE_TIMEOUT_MS") {
            let millis = value.trim().parse::<u64>().map_err(|e| ConfigError::InvalidVar {
                var: "TRUSTGATE_STORE_TIMEOUT_MS",
                value: value.clone(),
                reason: e.to_string(),
            })?;
            if millis == 0 {
                return Err(ConfigError::InvalidVar {
                    var: "TRUSTGATE_STORE_TIMEOUT_MS",
                    value,
                    reason: "must be greater than zero".to_owned(),
                });
            }
            config.store_timeout = Duration::from_millis(millis);
        }

        config.profiles_path = lookup("TRUSTGATE_PROFILES").map(PathBuf::from);

        Ok(config)
    }
}

/// Load a JSON array of profiles for provisioning.
///
/// # Errors
/// Returns [`ConfigError::ProfilesRead`] if the file cannot be read and
/// [`ConfigError::ProfilesParse`] if it does not hold valid profiles.
pub async fn load_profiles(path: &Path) -> Result<Vec<Profile>, ConfigError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ConfigError::ProfilesRead {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ConfigError::ProfilesParse {
        path: path.to_owned(),
        source,
    })
}
