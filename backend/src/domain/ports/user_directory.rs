//! Driving port for profile retrieval, update, search, activity, and stats.
//!
//! Inbound adapters (HTTP handlers) use this port without importing outbound
//! persistence concerns. Implementations enforce visibility rules from the
//! target's privacy preferences.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{
    ActivitySummary, Error, Principal, ProfileUpdate, UserId, UserProfile, UserStats, UserSummary,
};

/// Domain use-case port for the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a profile, filtered by the target's visibility settings.
    async fn get_profile(
        &self,
        requester: &Principal,
        target_id: &UserId,
    ) -> Result<UserProfile, Error>;

    /// Apply a partial update to the caller's own profile.
    async fn update_profile(
        &self,
        requester: &Principal,
        changes: ProfileUpdate,
    ) -> Result<UserProfile, Error>;

    /// Case-insensitive substring search over active users.
    async fn search(
        &self,
        requester: &Principal,
        query: &str,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, Error>;

    /// Recent activity for a user, gated by activity visibility.
    async fn activity(
        &self,
        requester: &Principal,
        target_id: &UserId,
        per_type_limit: i64,
    ) -> Result<ActivitySummary, Error>;

    /// Aggregate user statistics; admin only.
    async fn stats(&self, requester: &Principal) -> Result<UserStats, Error>;
}

/// Fixture directory where no users exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn get_profile(
        &self,
        _requester: &Principal,
        _target_id: &UserId,
    ) -> Result<UserProfile, Error> {
        Err(Error::user_not_found())
    }

    async fn update_profile(
        &self,
        requester: &Principal,
        _changes: ProfileUpdate,
    ) -> Result<UserProfile, Error> {
        requester.require_user_id()?;
        Err(Error::user_not_found())
    }

    async fn search(
        &self,
        _requester: &Principal,
        _query: &str,
        _page: PageRequest,
    ) -> Result<Page<UserSummary>, Error> {
        Ok(Page::new(Vec::new(), 0))
    }

    async fn activity(
        &self,
        _requester: &Principal,
        _target_id: &UserId,
        _per_type_limit: i64,
    ) -> Result<ActivitySummary, Error> {
        Err(Error::user_not_found())
    }

    async fn stats(&self, _requester: &Principal) -> Result<UserStats, Error> {
        Ok(UserStats::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_profile_lookup_fails_not_found() {
        let directory = FixtureUserDirectory;
        let err = directory
            .get_profile(&Principal::anonymous(), &UserId::random())
            .await
            .expect_err("no users in fixture");
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }
}
