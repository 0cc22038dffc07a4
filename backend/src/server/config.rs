//! Environment-driven application configuration.
//!
//! Every setting has a default suitable for local development; production
//! deployments override via environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::outbound::persistence::PoolConfig;

/// Configuration error raised during startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

fn env_parse<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

/// Application configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_idle: u32,
    pub db_connect_timeout_secs: u64,
    pub redis_url: String,
    pub redis_pool_size: u32,
}

impl AppConfig {
    /// Read configuration from the environment, applying defaults.
    ///
    /// Variables: `BIND_ADDR`, `DATABASE_URL`, `DB_MAX_CONNECTIONS`,
    /// `DB_MIN_IDLE`, `DB_CONNECT_TIMEOUT_SECS`, `REDIS_URL`,
    /// `REDIS_POOL_SIZE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: env_parse("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/recipes".to_owned()),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", 10)?,
            db_min_idle: env_parse("DB_MIN_IDLE", 2)?,
            db_connect_timeout_secs: env_parse("DB_CONNECT_TIMEOUT_SECS", 30)?,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_owned()),
            redis_pool_size: env_parse("REDIS_POOL_SIZE", 8)?,
        })
    }

    /// The database pool configuration derived from these settings.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(&self.database_url)
            .with_max_size(self.db_max_connections)
            .with_min_idle(Some(self.db_min_idle))
            .with_connection_timeout(Duration::from_secs(self.db_connect_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn env_parse_falls_back_to_the_default() {
        let parsed: u32 = env_parse("USER_MANAGEMENT_TEST_UNSET", 7).expect("default");
        assert_eq!(parsed, 7);
    }

    #[rstest]
    fn pool_config_carries_the_database_url() {
        let config = AppConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 9000)),
            database_url: "postgres://localhost/recipes_test".to_owned(),
            db_max_connections: 5,
            db_min_idle: 1,
            db_connect_timeout_secs: 3,
            redis_url: "redis://localhost:6379".to_owned(),
            redis_pool_size: 2,
        };
        assert_eq!(
            config.pool_config().database_url(),
            "postgres://localhost/recipes_test"
        );
    }
}
