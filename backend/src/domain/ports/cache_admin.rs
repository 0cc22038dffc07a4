//! Port for administrative cache operations.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by cache admin adapters.
    pub enum CacheAdminError {
        /// The cache could not be reached.
        Connection { message: String } =>
            "cache connection failed: {message}",
        /// The cache rejected the command.
        Command { message: String } =>
            "cache command failed: {message}",
    }
}

/// Port for cache maintenance and health checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheAdmin: Send + Sync {
    /// Delete keys matching `pattern`, returning how many were removed.
    async fn clear_pattern(&self, pattern: &str) -> Result<u64, CacheAdminError>;

    /// Round-trip liveness check.
    async fn ping(&self) -> Result<(), CacheAdminError>;
}

/// Fixture implementation that is always healthy and clears nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCacheAdmin;

#[async_trait]
impl CacheAdmin for FixtureCacheAdmin {
    async fn clear_pattern(&self, _pattern: &str) -> Result<u64, CacheAdminError> {
        Ok(0)
    }

    async fn ping(&self) -> Result<(), CacheAdminError> {
        Ok(())
    }
}
