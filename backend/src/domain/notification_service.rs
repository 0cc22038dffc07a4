//! Notification inbox domain service.
//!
//! Every mutation is a single statement with a returning clause at the
//! adapter, so retries observe either the before or after state and
//! repeated calls are no-op successes.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    NotificationInbox, NotificationRepository, NotificationRepositoryError,
};
use crate::domain::{Error, Notification, NotificationDeletion, Principal};

/// Notification service implementing the [`NotificationInbox`] port.
#[derive(Clone)]
pub struct NotificationInboxService<N> {
    notifications: Arc<N>,
}

impl<N> NotificationInboxService<N> {
    /// Create a new service with the given repository.
    pub fn new(notifications: Arc<N>) -> Self {
        Self { notifications }
    }
}

fn map_notification_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

#[async_trait]
impl<N> NotificationInbox for NotificationInboxService<N>
where
    N: NotificationRepository,
{
    async fn list(
        &self,
        requester: &Principal,
        page: PageRequest,
    ) -> Result<Page<Notification>, Error> {
        let user_id = requester.require_user_id()?;
        self.notifications
            .list_owned(&user_id, &page)
            .await
            .map_err(map_notification_error)
    }

    async fn delete_many(
        &self,
        requester: &Principal,
        ids: Vec<Uuid>,
    ) -> Result<NotificationDeletion, Error> {
        let user_id = requester.require_user_id()?;
        if ids.is_empty() {
            return Err(Error::validation("ids must not be empty"));
        }

        let deleted_ids = self
            .notifications
            .soft_delete_many(&user_id, &ids)
            .await
            .map_err(map_notification_error)?;
        if deleted_ids.is_empty() {
            return Err(
                Error::notification_not_found("no matching notifications found")
                    .with_details(json!({ "requestedIds": ids })),
            );
        }
        Ok(NotificationDeletion::classify(ids.len(), deleted_ids))
    }

    async fn mark_read(&self, requester: &Principal, notification_id: Uuid) -> Result<(), Error> {
        let user_id = requester.require_user_id()?;
        let marked = self
            .notifications
            .mark_read(&user_id, notification_id)
            .await
            .map_err(map_notification_error)?;
        if marked {
            return Ok(());
        }
        Err(Error::notification_not_found("notification not found"))
    }

    async fn mark_all_read(&self, requester: &Principal) -> Result<Vec<Uuid>, Error> {
        let user_id = requester.require_user_id()?;
        self.notifications
            .mark_all_read(&user_id)
            .await
            .map_err(map_notification_error)
    }
}
