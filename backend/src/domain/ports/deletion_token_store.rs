//! Port for the deletion-confirmation token cache.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by deletion token store adapters.
    pub enum DeletionTokenStoreError {
        /// The cache could not be reached.
        Connection { message: String } =>
            "token store connection failed: {message}",
        /// The cache rejected the command.
        Command { message: String } =>
            "token store command failed: {message}",
    }
}

/// Port for short-lived per-user confirmation tokens.
///
/// At most one live token per user; `put` overwrites any previous entry and
/// resets the TTL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeletionTokenStore: Send + Sync {
    /// Store `token` under the user's key with the given TTL.
    async fn put(
        &self,
        user_id: &UserId,
        token: &str,
        ttl_seconds: u64,
    ) -> Result<(), DeletionTokenStoreError>;

    /// Read the live token, if any.
    async fn get(&self, user_id: &UserId) -> Result<Option<String>, DeletionTokenStoreError>;

    /// Remove the token; removing an absent key is a no-op.
    async fn remove(&self, user_id: &UserId) -> Result<(), DeletionTokenStoreError>;
}

/// Fixture implementation holding no tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDeletionTokenStore;

#[async_trait]
impl DeletionTokenStore for FixtureDeletionTokenStore {
    async fn put(
        &self,
        _user_id: &UserId,
        _token: &str,
        _ttl_seconds: u64,
    ) -> Result<(), DeletionTokenStoreError> {
        Ok(())
    }

    async fn get(&self, _user_id: &UserId) -> Result<Option<String>, DeletionTokenStoreError> {
        Ok(None)
    }

    async fn remove(&self, _user_id: &UserId) -> Result<(), DeletionTokenStoreError> {
        Ok(())
    }
}
