//! Redis cache adapters.
//!
//! One bb8-pooled client backs both cache-facing ports: the deletion-token
//! store (namespaced `delete-token:{user-id}` keys with a TTL) and the admin
//! surface (pattern clear, ping). The cache owns nothing durable; every key
//! here is safe to lose.

use async_trait::async_trait;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use bb8_redis::RedisConnectionManager;

use crate::domain::ports::{
    CacheAdmin, CacheAdminError, DeletionTokenStore, DeletionTokenStoreError,
};
use crate::domain::UserId;

/// Key prefix for deletion-confirmation tokens.
const DELETE_TOKEN_PREFIX: &str = "delete-token";

fn token_key(user_id: &UserId) -> String {
    format!("{DELETE_TOKEN_PREFIX}:{user_id}")
}

/// Errors raised while building the Redis client.
#[derive(Debug, thiserror::Error)]
pub enum RedisCacheError {
    /// The connection URL was rejected or the pool could not be built.
    #[error("failed to build redis pool: {message}")]
    Build { message: String },
}

/// bb8-pooled Redis adapter implementing the cache-facing ports.
#[derive(Clone)]
pub struct RedisCacheStore {
    pool: Pool<RedisConnectionManager>,
}

impl RedisCacheStore {
    /// Connect to Redis at `url` with the given pool size.
    pub async fn connect(url: &str, max_size: u32) -> Result<Self, RedisCacheError> {
        let manager = RedisConnectionManager::new(url).map_err(|err| RedisCacheError::Build {
            message: err.to_string(),
        })?;
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .await
            .map_err(|err| RedisCacheError::Build {
                message: err.to_string(),
            })?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl DeletionTokenStore for RedisCacheStore {
    async fn put(
        &self,
        user_id: &UserId,
        token: &str,
        ttl_seconds: u64,
    ) -> Result<(), DeletionTokenStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| DeletionTokenStoreError::connection(err.to_string()))?;
        conn.set_ex::<_, _, ()>(token_key(user_id), token, ttl_seconds)
            .await
            .map_err(|err| DeletionTokenStoreError::command(err.to_string()))
    }

    async fn get(&self, user_id: &UserId) -> Result<Option<String>, DeletionTokenStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| DeletionTokenStoreError::connection(err.to_string()))?;
        conn.get(token_key(user_id))
            .await
            .map_err(|err| DeletionTokenStoreError::command(err.to_string()))
    }

    async fn remove(&self, user_id: &UserId) -> Result<(), DeletionTokenStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| DeletionTokenStoreError::connection(err.to_string()))?;
        conn.del::<_, ()>(token_key(user_id))
            .await
            .map_err(|err| DeletionTokenStoreError::command(err.to_string()))
    }
}

#[async_trait]
impl CacheAdmin for RedisCacheStore {
    async fn clear_pattern(&self, pattern: &str) -> Result<u64, CacheAdminError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CacheAdminError::connection(err.to_string()))?;

        // SCAN rather than KEYS so a broad pattern cannot stall the server.
        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter = conn
                .scan_match::<_, String>(pattern)
                .await
                .map_err(|err| CacheAdminError::command(err.to_string()))?;
            while let Some(key) = iter.next_item().await {
                keys.push(key.map_err(|err| CacheAdminError::command(err.to_string()))?);
            }
        }
        if keys.is_empty() {
            return Ok(0);
        }
        conn.del::<_, u64>(keys)
            .await
            .map_err(|err| CacheAdminError::command(err.to_string()))
    }

    async fn ping(&self) -> Result<(), CacheAdminError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CacheAdminError::connection(err.to_string()))?;
        bb8_redis::redis::cmd("PING")
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|err| CacheAdminError::command(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn token_keys_are_namespaced_by_user() {
        let user_id = UserId::random();
        let key = token_key(&user_id);
        assert!(key.starts_with("delete-token:"));
        assert!(key.ends_with(&user_id.to_string()));
    }
}
