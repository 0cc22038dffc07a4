//! Domain ports.
//!
//! Driven ports describe what the service needs from the stores; driving
//! ports describe what inbound adapters may ask of the service. Adapters on
//! either side implement these traits so the domain stays store-agnostic.

mod macros;

mod account_lifecycle;
mod activity_repository;
mod cache_admin;
mod deletion_token_store;
mod follow_repository;
mod notification_inbox;
mod notification_repository;
mod preference_center;
mod preferences_repository;
mod social_graph;
mod store_health;
mod user_directory;
mod user_repository;

pub(crate) use macros::define_port_error;

pub use account_lifecycle::{AccountLifecycle, FixtureAccountLifecycle};
pub use activity_repository::{
    ActivityRepository, ActivityRepositoryError, FixtureActivityRepository,
};
pub use cache_admin::{CacheAdmin, CacheAdminError, FixtureCacheAdmin};
pub use deletion_token_store::{
    DeletionTokenStore, DeletionTokenStoreError, FixtureDeletionTokenStore,
};
pub use follow_repository::{FixtureFollowRepository, FollowRepository, FollowRepositoryError};
pub use notification_inbox::{FixtureNotificationInbox, NotificationInbox};
pub use notification_repository::{
    FixtureNotificationRepository, NotificationRepository, NotificationRepositoryError,
};
pub use preference_center::{FixturePreferenceCenter, PreferenceCenter};
pub use preferences_repository::{
    FixturePreferencesRepository, PreferencesRepository, PreferencesRepositoryError,
};
pub use social_graph::{FixtureSocialGraph, SocialGraph};
pub use store_health::{FixtureStoreHealth, StoreHealth, StoreHealthError};
pub use user_directory::{FixtureUserDirectory, UserDirectory};
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};

#[cfg(test)]
pub use account_lifecycle::MockAccountLifecycle;
#[cfg(test)]
pub use activity_repository::MockActivityRepository;
#[cfg(test)]
pub use cache_admin::MockCacheAdmin;
#[cfg(test)]
pub use deletion_token_store::MockDeletionTokenStore;
#[cfg(test)]
pub use follow_repository::MockFollowRepository;
#[cfg(test)]
pub use notification_inbox::MockNotificationInbox;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
#[cfg(test)]
pub use preference_center::MockPreferenceCenter;
#[cfg(test)]
pub use preferences_repository::MockPreferencesRepository;
#[cfg(test)]
pub use social_graph::MockSocialGraph;
#[cfg(test)]
pub use store_health::MockStoreHealth;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
#[cfg(test)]
pub use user_repository::MockUserRepository;
