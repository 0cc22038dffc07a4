//! Two-phase account deletion domain service.
//!
//! The cache is the sole authority for "confirmation allowed": the request
//! phase mints a token under the user's key with a 24-hour TTL, and the
//! confirm phase validates it, soft-deactivates the account, then removes
//! the token so it is single-use.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::RngCore;

use crate::domain::deletion::TOKEN_TTL_HOURS;
use crate::domain::ports::{
    AccountLifecycle, DeletionTokenStore, DeletionTokenStoreError, UserRepository,
};
use crate::domain::profile_service::map_user_error;
use crate::domain::{DeletionConfirmation, DeletionRequest, Error, ErrorCode, Principal};

/// Account lifecycle service implementing the [`AccountLifecycle`] port.
#[derive(Clone)]
pub struct AccountLifecycleService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
}

impl<U, T> AccountLifecycleService<U, T> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, tokens: Arc<T>) -> Self {
        Self { users, tokens }
    }
}

fn map_token_error(error: DeletionTokenStoreError) -> Error {
    match error {
        DeletionTokenStoreError::Connection { message } => {
            Error::cache_unavailable(format!("token store unreachable: {message}"))
        }
        DeletionTokenStoreError::Command { message } => {
            Error::cache_unavailable(format!("token store command failed: {message}"))
        }
    }
}

/// 32 bytes from the OS generator, hex encoded.
fn generate_token() -> String {
    let mut bytes = [0_u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[async_trait]
impl<U, T> AccountLifecycle for AccountLifecycleService<U, T>
where
    U: UserRepository,
    T: DeletionTokenStore,
{
    async fn request_deletion(&self, requester: &Principal) -> Result<DeletionRequest, Error> {
        let user_id = requester.require_user_id()?;
        if !self
            .users
            .exists(&user_id)
            .await
            .map_err(map_user_error)?
        {
            return Err(Error::user_not_found());
        }

        let token = generate_token();
        let ttl_seconds = u64::try_from(TOKEN_TTL_HOURS * 3600).unwrap_or(86_400);
        self.tokens
            .put(&user_id, &token, ttl_seconds)
            .await
            .map_err(map_token_error)?;
        Ok(DeletionRequest::new(user_id, token, Utc::now()))
    }

    async fn confirm_deletion(
        &self,
        requester: &Principal,
        token: &str,
    ) -> Result<DeletionConfirmation, Error> {
        let user_id = requester.require_user_id()?;

        let stored = self
            .tokens
            .get(&user_id)
            .await
            .map_err(map_token_error)?
            .ok_or_else(|| {
                Error::new(
                    ErrorCode::TokenExpiredOrMissing,
                    "deletion token expired or missing",
                )
            })?;
        if stored != token {
            return Err(Error::new(
                ErrorCode::TokenInvalid,
                "deletion token does not match",
            ));
        }

        let deactivated_at = self
            .users
            .deactivate(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(Error::user_not_found)?;

        // Single-use: failure here is harmless because the account is
        // already inactive, so log and continue.
        if let Err(err) = self.tokens.remove(&user_id).await {
            tracing::warn!(user_id = %user_id, error = %err, "failed to remove deletion token");
        }

        Ok(DeletionConfirmation {
            user_id,
            is_active: false,
            deactivated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockDeletionTokenStore, MockUserRepository};
    use crate::domain::UserId;

    fn caller(user_id: &UserId) -> Principal {
        Principal::user(user_id.clone(), Vec::new())
    }

    fn service(
        users: MockUserRepository,
        tokens: MockDeletionTokenStore,
    ) -> AccountLifecycleService<MockUserRepository, MockDeletionTokenStore> {
        AccountLifecycleService::new(Arc::new(users), Arc::new(tokens))
    }

    #[tokio::test]
    async fn request_mints_token_with_daylong_ttl() {
        let user_id = UserId::random();
        let mut users = MockUserRepository::new();
        users.expect_exists().returning(|_| Ok(true));
        let mut tokens = MockDeletionTokenStore::new();
        tokens
            .expect_put()
            .withf(|_, token, ttl| !token.is_empty() && *ttl == 86_400)
            .returning(|_, _, _| Ok(()));
        let svc = service(users, tokens);

        let request = svc
            .request_deletion(&caller(&user_id))
            .await
            .expect("token minted");
        assert_eq!(request.user_id, user_id);
        assert_eq!(request.confirmation_token.len(), 64);
        assert!(request.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn request_fails_when_cache_is_down() {
        let user_id = UserId::random();
        let mut users = MockUserRepository::new();
        users.expect_exists().returning(|_| Ok(true));
        let mut tokens = MockDeletionTokenStore::new();
        tokens
            .expect_put()
            .returning(|_, _, _| Err(DeletionTokenStoreError::connection("refused")));
        let svc = service(users, tokens);

        let err = svc
            .request_deletion(&caller(&user_id))
            .await
            .expect_err("cache down");
        assert_eq!(err.code(), ErrorCode::CacheUnavailable);
    }

    #[tokio::test]
    async fn confirm_with_matching_token_deactivates_once() {
        let user_id = UserId::random();
        let mut users = MockUserRepository::new();
        let deactivated_at = Utc::now();
        users
            .expect_deactivate()
            .times(1)
            .returning(move |_| Ok(Some(deactivated_at)));
        let mut tokens = MockDeletionTokenStore::new();
        tokens
            .expect_get()
            .returning(|_| Ok(Some("sesame".to_owned())));
        tokens.expect_remove().times(1).returning(|_| Ok(()));
        let svc = service(users, tokens);

        let confirmation = svc
            .confirm_deletion(&caller(&user_id), "sesame")
            .await
            .expect("confirmed");
        assert!(!confirmation.is_active);
        assert_eq!(confirmation.user_id, user_id);
    }

    #[tokio::test]
    async fn confirm_without_stored_token_is_expired_or_missing() {
        let user_id = UserId::random();
        let mut tokens = MockDeletionTokenStore::new();
        tokens.expect_get().returning(|_| Ok(None));
        let svc = service(MockUserRepository::new(), tokens);

        let err = svc
            .confirm_deletion(&caller(&user_id), "anything")
            .await
            .expect_err("no token on record");
        assert_eq!(err.code(), ErrorCode::TokenExpiredOrMissing);
    }

    #[tokio::test]
    async fn confirm_with_mismatched_token_is_invalid() {
        let user_id = UserId::random();
        let mut tokens = MockDeletionTokenStore::new();
        tokens
            .expect_get()
            .returning(|_| Ok(Some("sesame".to_owned())));
        let svc = service(MockUserRepository::new(), tokens);

        let err = svc
            .confirm_deletion(&caller(&user_id), "open-barley")
            .await
            .expect_err("wrong token");
        assert_eq!(err.code(), ErrorCode::TokenInvalid);
    }

    #[tokio::test]
    async fn failed_token_removal_does_not_fail_confirmation() {
        let user_id = UserId::random();
        let mut users = MockUserRepository::new();
        users
            .expect_deactivate()
            .returning(|_| Ok(Some(Utc::now())));
        let mut tokens = MockDeletionTokenStore::new();
        tokens
            .expect_get()
            .returning(|_| Ok(Some("sesame".to_owned())));
        tokens
            .expect_remove()
            .returning(|_| Err(DeletionTokenStoreError::command("timeout")));
        let svc = service(users, tokens);

        svc.confirm_deletion(&caller(&user_id), "sesame")
            .await
            .expect("removal failure is logged, not surfaced");
    }

    #[test]
    fn generated_tokens_are_long_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
