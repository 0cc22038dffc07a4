//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountLifecycle, CacheAdmin, FixtureAccountLifecycle, FixtureCacheAdmin,
    FixtureNotificationInbox, FixturePreferenceCenter, FixtureSocialGraph, FixtureStoreHealth,
    FixtureUserDirectory, NotificationInbox, PreferenceCenter, SocialGraph, StoreHealth,
    UserDirectory,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn UserDirectory>,
    pub social: Arc<dyn SocialGraph>,
    pub preferences: Arc<dyn PreferenceCenter>,
    pub lifecycle: Arc<dyn AccountLifecycle>,
    pub notifications: Arc<dyn NotificationInbox>,
    pub store_health: Arc<dyn StoreHealth>,
    pub cache: Arc<dyn CacheAdmin>,
}

impl HttpState {
    /// State backed entirely by fixtures, for handler tests that only need a
    /// subset of ports wired to real doubles.
    pub fn fixture() -> Self {
        Self {
            directory: Arc::new(FixtureUserDirectory),
            social: Arc::new(FixtureSocialGraph),
            preferences: Arc::new(FixturePreferenceCenter),
            lifecycle: Arc::new(FixtureAccountLifecycle),
            notifications: Arc::new(FixtureNotificationInbox),
            store_health: Arc::new(FixtureStoreHealth),
            cache: Arc::new(FixtureCacheAdmin),
        }
    }
}
