//! Preference HTTP handlers.
//!
//! ```text
//! GET /api/v1/user-management/users/{user-id}/preferences
//! PUT /api/v1/user-management/users/{user-id}/preferences
//! GET /api/v1/user-management/users/{user-id}/preferences/{category}
//! PUT /api/v1/user-management/users/{user-id}/preferences/{category}
//! GET /api/v1/user-management/notifications/preferences
//! PUT /api/v1/user-management/notifications/preferences
//! ```
//!
//! Category bodies are partial: absent fields keep their stored values, or
//! the canonical defaults when no row exists yet. The `/notifications`
//! prefixed pair aliases the caller's own notification category.

use actix_web::{get, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::preferences::{PreferenceCategory, PreferencePatch, PreferencesPatchSet};
use crate::domain::Error;
use crate::inbound::http::auth::RequestPrincipal;
use crate::inbound::http::envelope::ok_json;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_categories, parse_user_id};
use crate::inbound::http::ApiResult;

/// Optional category filter for the full-set read.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(deny_unknown_fields, default)]
pub struct CategoriesQuery {
    /// Comma-separated category names.
    pub categories: Option<String>,
}

/// Fetch every preference category for a user.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/users/{user_id}/preferences",
    params(("user_id" = String, Path, description = "Target user id"), CategoriesQuery),
    responses(
        (status = 200, description = "Preference set"),
        (status = 400, description = "Unknown category in the filter", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 403, description = "Not the caller's preferences", body = Error),
        (status = 404, description = "Unknown or deactivated user", body = Error)
    ),
    tags = ["preferences"],
    operation_id = "getPreferences"
)]
#[get("/users/{user_id}/preferences")]
pub async fn get_preferences(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<String>,
    query: web::Query<CategoriesQuery>,
) -> ApiResult<HttpResponse> {
    let target_id = parse_user_id(&path)?;
    let categories = parse_categories(query.into_inner().categories.as_deref())?;
    let set = state
        .preferences
        .get_all(principal.principal(), &target_id, categories)
        .await?;
    Ok(ok_json(set))
}

/// Partial-merge update across several categories at once.
#[utoipa::path(
    put,
    path = "/api/v1/user-management/users/{user_id}/preferences",
    params(("user_id" = String, Path, description = "Target user id")),
    responses(
        (status = 200, description = "Updated categories"),
        (status = 400, description = "Empty or malformed patch set", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 403, description = "Not the caller's preferences", body = Error),
        (status = 404, description = "Unknown or deactivated user", body = Error)
    ),
    tags = ["preferences"],
    operation_id = "updatePreferences"
)]
#[put("/users/{user_id}/preferences")]
pub async fn update_preferences(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<String>,
    payload: web::Json<PreferencesPatchSet>,
) -> ApiResult<HttpResponse> {
    let target_id = parse_user_id(&path)?;
    let set = state
        .preferences
        .update_many(principal.principal(), &target_id, payload.into_inner())
        .await?;
    Ok(ok_json(set))
}

/// Fetch one preference category.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/users/{user_id}/preferences/{category}",
    params(
        ("user_id" = String, Path, description = "Target user id"),
        ("category" = String, Path, description = "Preference category name")
    ),
    responses(
        (status = 200, description = "Category record"),
        (status = 400, description = "Unknown category", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 403, description = "Not the caller's preferences", body = Error),
        (status = 404, description = "Unknown or deactivated user", body = Error)
    ),
    tags = ["preferences"],
    operation_id = "getPreferenceCategory"
)]
#[get("/users/{user_id}/preferences/{category}")]
pub async fn get_preference_category(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (user, category) = path.into_inner();
    let target_id = parse_user_id(&user)?;
    let category = PreferenceCategory::parse(&category)?;
    let record = state
        .preferences
        .get_category(principal.principal(), &target_id, category)
        .await?;
    Ok(ok_json(record))
}

/// Partial-merge update of one preference category.
#[utoipa::path(
    put,
    path = "/api/v1/user-management/users/{user_id}/preferences/{category}",
    params(
        ("user_id" = String, Path, description = "Target user id"),
        ("category" = String, Path, description = "Preference category name")
    ),
    responses(
        (status = 200, description = "Merged category record"),
        (status = 400, description = "Unknown category or malformed patch", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 403, description = "Not the caller's preferences", body = Error),
        (status = 404, description = "Unknown or deactivated user", body = Error)
    ),
    tags = ["preferences"],
    operation_id = "updatePreferenceCategory"
)]
#[put("/users/{user_id}/preferences/{category}")]
pub async fn update_preference_category(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<(String, String)>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (user, category) = path.into_inner();
    let target_id = parse_user_id(&user)?;
    let category = PreferenceCategory::parse(&category)?;
    let patch = PreferencePatch::from_json(category, payload.into_inner())?;
    let record = state
        .preferences
        .update_category(principal.principal(), &target_id, patch)
        .await?;
    Ok(ok_json(record))
}

/// Alias: the caller's own notification preferences.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/notifications/preferences",
    responses(
        (status = 200, description = "Notification category record"),
        (status = 401, description = "Authentication required", body = Error)
    ),
    tags = ["preferences"],
    operation_id = "getNotificationPreferences"
)]
#[get("/notifications/preferences")]
pub async fn get_notification_preferences(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
) -> ApiResult<HttpResponse> {
    let principal = principal.into_inner();
    let user_id = principal.require_user_id()?;
    let record = state
        .preferences
        .get_category(&principal, &user_id, PreferenceCategory::Notification)
        .await?;
    Ok(ok_json(record))
}

/// Alias: partial-merge update of the caller's own notification preferences.
#[utoipa::path(
    put,
    path = "/api/v1/user-management/notifications/preferences",
    responses(
        (status = 200, description = "Merged notification category record"),
        (status = 400, description = "Malformed patch", body = Error),
        (status = 401, description = "Authentication required", body = Error)
    ),
    tags = ["preferences"],
    operation_id = "updateNotificationPreferences"
)]
#[put("/notifications/preferences")]
pub async fn update_notification_preferences(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let principal = principal.into_inner();
    let user_id = principal.require_user_id()?;
    let patch = PreferencePatch::from_json(PreferenceCategory::Notification, payload.into_inner())?;
    let record = state
        .preferences
        .update_category(&principal, &user_id, patch)
        .await?;
    Ok(ok_json(record))
}
