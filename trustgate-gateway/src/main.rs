//! Entry point for the `trustgate-gateway` HTTP server.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use trustgate_engine::{InMemoryProfileStore, SystemClock, TimeoutStore, TrustEvaluator};
use trustgate_gateway::config::{load_profiles, GatewayConfig};
use trustgate_gateway::routes::{create_router, SharedClock, SharedStore};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let profiles = Arc::new(InMemoryProfileStore::new());
    if let Some(path) = &config.profiles_path {
        match load_profiles(path).await {
            Ok(loaded) => {
                let count = loaded.len();
                for profile in loaded {
                    profiles.provision(profile).await;
                }
                info!(path = %path.display(), count, "provisioned profiles");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load profiles");
                std::process::exit(1);
            }
        }
    } else {
        tracing::warn!("TRUSTGATE_PROFILES not set; every client is unknown and will be denied");
    }

    let store: SharedStore = Arc::new(TimeoutStore::new(profiles, config.store_timeout));
    let clock: SharedClock = Arc::new(SystemClock);
    let evaluator = Arc::new(TrustEvaluator::with_clock(store, clock, config.evaluator));
    let policy = evaluator.config();
    let app = create_router(evaluator);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.listen_addr,
        trust_threshold = policy.trust_threshold.value(),
        learn_common_hours = policy.learn_common_hours,
        "trustgate-gateway listening"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
