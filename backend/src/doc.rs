//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every endpoint from the inbound layer, the domain
//! schemas they reference, and the gateway header security scheme.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::preferences::{
    AccessibilityPreferences, DisplayPreferences, LanguagePreferences, NotificationPreferences,
    PreferenceCategory, PreferencesSet, PrivacyPreferences, SecurityPreferences,
    SocialPreferences, SoundPreferences, ThemePreferences,
};
use crate::domain::{
    ActivitySummary, DeletionConfirmation, DeletionRequest, Error, ErrorCode, FollowStatus,
    Notification, UserProfile, UserStats, UserSummary,
};
use crate::inbound::http::accounts::ConfirmDeletionRequest;
use crate::inbound::http::admin::CacheClearRequest;
use crate::inbound::http::notifications::DeleteNotificationsRequest;
use crate::inbound::http::users::ProfileUpdateRequest;

/// Enrich the generated document with the gateway identity header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "GatewayUserId",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-User-Id",
                "Authenticated user id injected by the API gateway.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "User management API",
        description = "Profiles, follows, preferences, notifications, and \
                       account lifecycle for the recipe platform."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("GatewayUserId" = [])),
    paths(
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::get_activity,
        crate::inbound::http::follows::follow_user,
        crate::inbound::http::follows::unfollow_user,
        crate::inbound::http::follows::list_followers,
        crate::inbound::http::follows::list_following,
        crate::inbound::http::preferences::get_preferences,
        crate::inbound::http::preferences::update_preferences,
        crate::inbound::http::preferences::get_preference_category,
        crate::inbound::http::preferences::update_preference_category,
        crate::inbound::http::preferences::get_notification_preferences,
        crate::inbound::http::preferences::update_notification_preferences,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::delete_notifications,
        crate::inbound::http::notifications::mark_notification_read,
        crate::inbound::http::notifications::mark_all_notifications_read,
        crate::inbound::http::accounts::request_account_deletion,
        crate::inbound::http::accounts::confirm_account_deletion,
        crate::inbound::http::admin::get_user_stats,
        crate::inbound::http::admin::clear_cache,
        crate::inbound::http::metrics::performance_metrics,
        crate::inbound::http::metrics::cache_metrics,
        crate::inbound::http::metrics::system_metrics,
        crate::inbound::http::metrics::detailed_health,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserProfile,
        UserSummary,
        UserStats,
        FollowStatus,
        Notification,
        ActivitySummary,
        DeletionRequest,
        DeletionConfirmation,
        PreferenceCategory,
        PreferencesSet,
        NotificationPreferences,
        DisplayPreferences,
        PrivacyPreferences,
        AccessibilityPreferences,
        LanguagePreferences,
        SecurityPreferences,
        SocialPreferences,
        SoundPreferences,
        ThemePreferences,
        ProfileUpdateRequest,
        DeleteNotificationsRequest,
        ConfirmDeletionRequest,
        CacheClearRequest,
    )),
    tags(
        (name = "users", description = "Profiles, search, and activity"),
        (name = "follows", description = "Follow relationships"),
        (name = "preferences", description = "Per-category user preferences"),
        (name = "notifications", description = "Notification inbox"),
        (name = "accounts", description = "Two-phase account deletion"),
        (name = "admin", description = "Administrative operations"),
        (name = "metrics", description = "Service metrics"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
