//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use journal_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // First non-empty value among a variable and its alias.
        let first = |keys: [&str; 2]| {
            keys.into_iter()
                .find_map(|key| lookup(key).filter(|value| !value.is_empty()))
        };
        let parsed = |key: &str| lookup(key).and_then(|s| s.parse::<u64>().ok());

        let database = first(["DATABASE_URL", "SUPABASE_DB_URL"]).map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.schema = first(["DATABASE_SCHEMA", "SUPABASE_SCHEMA"]);

            if let Some(max) = parsed("DB_MAX_CONNECTIONS").and_then(|n| u32::try_from(n).ok()) {
                config.max_connections = max;
            }
            if let Some(min) = parsed("DB_MIN_CONNECTIONS").and_then(|n| u32::try_from(n).ok()) {
                config.min_connections = min;
            }
            if let Some(secs) = parsed("DB_CONNECT_TIMEOUT_SECS") {
                config.connect_timeout = Duration::from_secs(secs);
            }
            if let Some(secs) = parsed("DB_IDLE_TIMEOUT_SECS") {
                config.idle_timeout = Duration::from_secs(secs);
            }
            config
        });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
        }
    }
}
