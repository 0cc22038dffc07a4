//! Driving port for two-phase account deletion.

use async_trait::async_trait;

use crate::domain::{DeletionConfirmation, DeletionRequest, Error, Principal};

/// Domain use-case port for requesting and confirming account deletion.
///
/// The request phase mints a single-use token with a 24-hour TTL in the
/// cache; the confirm phase validates it and soft-deactivates the account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountLifecycle: Send + Sync {
    /// Mint a confirmation token for the authenticated caller.
    async fn request_deletion(&self, requester: &Principal) -> Result<DeletionRequest, Error>;

    /// Validate the presented token and deactivate the caller's account.
    async fn confirm_deletion(
        &self,
        requester: &Principal,
        token: &str,
    ) -> Result<DeletionConfirmation, Error>;
}

/// Fixture lifecycle where no accounts exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountLifecycle;

#[async_trait]
impl AccountLifecycle for FixtureAccountLifecycle {
    async fn request_deletion(&self, requester: &Principal) -> Result<DeletionRequest, Error> {
        requester.require_user_id()?;
        Err(Error::user_not_found())
    }

    async fn confirm_deletion(
        &self,
        requester: &Principal,
        _token: &str,
    ) -> Result<DeletionConfirmation, Error> {
        requester.require_user_id()?;
        Err(Error::new(
            crate::domain::ErrorCode::TokenExpiredOrMissing,
            "no deletion request on record",
        ))
    }
}
