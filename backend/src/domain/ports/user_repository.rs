//! Port for durable user storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::{ProfileUpdate, User, UserId, UserStats, UserSummary};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Connection to the store could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// A unique constraint rejected the write.
        UniqueViolation { constraint: String } =>
            "unique constraint violated: {constraint}",
    }
}

/// Port for reading and mutating user rows.
///
/// `users` rows are created by a sibling registration service; this service
/// only reads and updates them. Deactivation is soft and single-statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch one user by id, including inactive rows.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Whether an active user with this id exists.
    async fn exists(&self, user_id: &UserId) -> Result<bool, UserRepositoryError>;

    /// Apply a partial profile update, bumping `updated_at`.
    ///
    /// Returns `None` when the user does not exist. A duplicate username
    /// surfaces as [`UserRepositoryError::UniqueViolation`].
    async fn update_profile(
        &self,
        user_id: &UserId,
        changes: &ProfileUpdate,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Case-insensitive substring search over active users' usernames and
    /// full names, ordered by username ascending.
    async fn search_active(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> Result<Page<UserSummary>, UserRepositoryError>;

    /// Aggregate user counts computed in one round trip.
    async fn stats(&self) -> Result<UserStats, UserRepositoryError>;

    /// Soft-deactivate one user, returning the new `updated_at`.
    ///
    /// Returns `None` when the user does not exist.
    async fn deactivate(&self, user_id: &UserId)
        -> Result<Option<DateTime<Utc>>, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise user storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn exists(&self, _user_id: &UserId) -> Result<bool, UserRepositoryError> {
        Ok(false)
    }

    async fn update_profile(
        &self,
        _user_id: &UserId,
        _changes: &ProfileUpdate,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn search_active(
        &self,
        _query: &str,
        _page: &PageRequest,
    ) -> Result<Page<UserSummary>, UserRepositoryError> {
        Ok(Page::new(Vec::new(), 0))
    }

    async fn stats(&self) -> Result<UserStats, UserRepositoryError> {
        Ok(UserStats::default())
    }

    async fn deactivate(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<DateTime<Utc>>, UserRepositoryError> {
        Ok(None)
    }
}
