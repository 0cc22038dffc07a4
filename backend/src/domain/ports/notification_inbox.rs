//! Driving port for the caller's notification inbox.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::{Error, Notification, NotificationDeletion, Principal};

/// Domain use-case port for notifications.
///
/// Every operation acts on the authenticated caller's own notifications;
/// soft-deleted rows are invisible throughout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// The caller's non-deleted notifications, newest first.
    async fn list(
        &self,
        requester: &Principal,
        page: PageRequest,
    ) -> Result<Page<Notification>, Error>;

    /// Soft-delete the given ids, reporting which actually transitioned.
    async fn delete_many(
        &self,
        requester: &Principal,
        ids: Vec<Uuid>,
    ) -> Result<NotificationDeletion, Error>;

    /// Mark one notification read; repeated marking is a no-op success.
    async fn mark_read(&self, requester: &Principal, notification_id: Uuid) -> Result<(), Error>;

    /// Mark all unread notifications read, returning the transitioned ids.
    async fn mark_all_read(&self, requester: &Principal) -> Result<Vec<Uuid>, Error>;
}

/// Fixture inbox that is always empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationInbox;

#[async_trait]
impl NotificationInbox for FixtureNotificationInbox {
    async fn list(
        &self,
        requester: &Principal,
        _page: PageRequest,
    ) -> Result<Page<Notification>, Error> {
        requester.require_user_id()?;
        Ok(Page::new(Vec::new(), 0))
    }

    async fn delete_many(
        &self,
        requester: &Principal,
        ids: Vec<Uuid>,
    ) -> Result<NotificationDeletion, Error> {
        requester.require_user_id()?;
        Ok(NotificationDeletion::classify(ids.len(), Vec::new()))
    }

    async fn mark_read(&self, requester: &Principal, _notification_id: Uuid) -> Result<(), Error> {
        requester.require_user_id()?;
        Err(Error::notification_not_found("notification not found"))
    }

    async fn mark_all_read(&self, requester: &Principal) -> Result<Vec<Uuid>, Error> {
        requester.require_user_id()?;
        Ok(Vec::new())
    }
}
