//! Port for relational-store health checks.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by store health adapters.
    pub enum StoreHealthError {
        /// The store could not be reached.
        Unreachable { message: String } =>
            "store unreachable: {message}",
    }
}

/// Port used by the readiness probe to ping the relational store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Round-trip liveness check against the store.
    async fn ping(&self) -> Result<(), StoreHealthError>;
}

/// Fixture implementation that is always reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStoreHealth;

#[async_trait]
impl StoreHealth for FixtureStoreHealth {
    async fn ping(&self) -> Result<(), StoreHealthError> {
        Ok(())
    }
}
