//! Port for notification storage.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::{Notification, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Connection to the store could not be established.
        Connection { message: String } =>
            "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "notification repository query failed: {message}",
    }
}

/// Port for reading and mutating a user's notifications.
///
/// Every operation is scoped to the owning user; rows with the deleted flag
/// set are invisible throughout. Bulk mutations execute as single statements
/// with returning clauses so partial progress is impossible.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Non-deleted notifications owned by `user_id`, newest first.
    async fn list_owned(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Notification>, NotificationRepositoryError>;

    /// Soft-delete the given ids where owned and not already deleted.
    ///
    /// Returns the subset of ids that actually transitioned.
    async fn soft_delete_many(
        &self,
        user_id: &UserId,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, NotificationRepositoryError>;

    /// Mark one notification read; `false` when no live owned row matched.
    async fn mark_read(
        &self,
        user_id: &UserId,
        notification_id: Uuid,
    ) -> Result<bool, NotificationRepositoryError>;

    /// Mark every unread non-deleted notification read, returning the ids
    /// that transitioned.
    async fn mark_all_read(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Uuid>, NotificationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationRepository;

#[async_trait]
impl NotificationRepository for FixtureNotificationRepository {
    async fn list_owned(
        &self,
        _user_id: &UserId,
        _page: &PageRequest,
    ) -> Result<Page<Notification>, NotificationRepositoryError> {
        Ok(Page::new(Vec::new(), 0))
    }

    async fn soft_delete_many(
        &self,
        _user_id: &UserId,
        _ids: &[Uuid],
    ) -> Result<Vec<Uuid>, NotificationRepositoryError> {
        Ok(Vec::new())
    }

    async fn mark_read(
        &self,
        _user_id: &UserId,
        _notification_id: Uuid,
    ) -> Result<bool, NotificationRepositoryError> {
        Ok(false)
    }

    async fn mark_all_read(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Uuid>, NotificationRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_delete_transitions_nothing() {
        let repo = FixtureNotificationRepository;
        let transitioned = repo
            .soft_delete_many(&UserId::random(), &[Uuid::new_v4()])
            .await
            .expect("fixture delete should succeed");
        assert!(transitioned.is_empty());
    }
}
