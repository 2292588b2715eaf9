//! Environment-driven runtime configuration.

use tuckshop_orders::TransitionPolicy;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite URL; the file is created if missing.
    pub database_url: String,
    pub bind_addr: String,
    /// How strictly order status transitions are policed.
    pub status_policy: TransitionPolicy,
    /// Seed the demo menu when the catalog is empty.
    pub seed_demo_menu: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:tuckshop.db".to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
            status_policy: TransitionPolicy::default(),
            seed_demo_menu: true,
        }
    }
}

impl AppConfig {
    /// Read `DATABASE_URL`, `BIND_ADDR` and `STATUS_POLICY` from the
    /// environment, falling back to defaults (with a warning for an
    /// unrecognized policy).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(policy) = std::env::var("STATUS_POLICY") {
            match policy.parse() {
                Ok(policy) => config.status_policy = policy,
                Err(e) => tracing::warn!("{e}; keeping permissive status policy"),
            }
        }

        config
    }
}
