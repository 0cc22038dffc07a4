//! Domain layer: entities, services, and ports.
//!
//! The services here hold every business rule the HTTP layer relies on:
//! visibility gating, idempotent follow and notification mutations,
//! preference partial-merge, and two-phase account deletion. Stores are
//! reached only through the ports in [`ports`].

mod access;
mod activity;
mod deletion;
mod deletion_service;
mod error;
mod follow;
mod follow_service;
mod notification;
mod notification_service;
pub mod ports;
pub mod preferences;
mod preferences_service;
mod principal;
mod profile_service;
mod user;

pub use activity::{
    ActivitySummary, FavoriteActivity, FollowActivity, RecipeActivity, ReviewActivity,
    DEFAULT_PER_TYPE_LIMIT, MAX_PER_TYPE_LIMIT,
};
pub use deletion::{DeletionConfirmation, DeletionRequest, TOKEN_TTL_HOURS};
pub use deletion_service::AccountLifecycleService;
pub use error::{Error, ErrorCode};
pub use follow::FollowStatus;
pub use follow_service::SocialGraphService;
pub use notification::{DeletionOutcome, Notification, NotificationDeletion};
pub use notification_service::NotificationInboxService;
pub use preferences_service::PreferenceCenterService;
pub use principal::{Principal, Scope, UnknownScopeError};
pub use profile_service::UserDirectoryService;
pub use user::{ProfileUpdate, User, UserId, UserProfile, UserStats, UserSummary};
