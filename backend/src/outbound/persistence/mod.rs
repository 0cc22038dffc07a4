//! PostgreSQL persistence adapters.

mod diesel_activity_repository;
mod diesel_error;
mod diesel_follow_repository;
mod diesel_notification_repository;
mod diesel_preferences_repository;
mod diesel_user_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_activity_repository::DieselActivityRepository;
pub use diesel_follow_repository::DieselFollowRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_preferences_repository::DieselPreferencesRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
