//! User directory HTTP handlers.
//!
//! ```text
//! GET /api/v1/user-management/users/{user-id}/profile
//! GET /api/v1/user-management/users/{user-id}
//! PUT /api/v1/user-management/users/profile
//! GET /api/v1/user-management/users/search
//! GET /api/v1/user-management/users/{user-id}/activity
//! ```

use actix_web::{get, put, web, HttpResponse};
use serde::Deserialize;

use crate::domain::{Error, ProfileUpdate};
use crate::inbound::http::auth::RequestPrincipal;
use crate::inbound::http::envelope::ok_json;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, ActivityQuery, PageQuery};
use crate::inbound::http::ApiResult;

/// Request payload for a partial profile update.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ProfileUpdateRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(value: ProfileUpdateRequest) -> Self {
        Self {
            username: value.username,
            email: value.email,
            full_name: value.full_name,
            bio: value.bio,
        }
    }
}

/// Query parameters for the user search endpoint.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub count_only: Option<bool>,
}

/// Fetch a user's profile, filtered by their visibility settings.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/users/{user_id}/profile",
    params(("user_id" = String, Path, description = "Target user id")),
    responses(
        (status = 200, description = "Profile"),
        (status = 403, description = "Profile is private", body = Error),
        (status = 404, description = "Unknown or deactivated user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserProfile"
)]
#[get("/users/{user_id}/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let target_id = parse_user_id(&path)?;
    let profile = state
        .directory
        .get_profile(principal.principal(), &target_id)
        .await?;
    Ok(ok_json(profile))
}

/// Public user lookup; same visibility gating as the profile endpoint.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/users/{user_id}",
    params(("user_id" = String, Path, description = "Target user id")),
    responses(
        (status = 200, description = "User"),
        (status = 404, description = "Unknown or deactivated user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let target_id = parse_user_id(&path)?;
    let profile = state
        .directory
        .get_profile(principal.principal(), &target_id)
        .await?;
    Ok(ok_json(profile))
}

/// Partially update the caller's own profile.
#[utoipa::path(
    put,
    path = "/api/v1/user-management/users/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile"),
        (status = 400, description = "No fields supplied or empty username", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 409, description = "Username already taken", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<HttpResponse> {
    let profile = state
        .directory
        .update_profile(principal.principal(), payload.into_inner().into())
        .await?;
    Ok(ok_json(profile))
}

/// Case-insensitive substring search over active users.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/users/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching users"),
        (status = 400, description = "Empty query or bad pagination", body = Error)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[get("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    query: web::Query<SearchQuery>,
) -> ApiResult<HttpResponse> {
    let SearchQuery {
        query,
        limit,
        offset,
        count_only,
    } = query.into_inner();
    let page = PageQuery {
        limit,
        offset,
        count_only,
    }
    .into_page_request()?;
    let results = state
        .directory
        .search(
            principal.principal(),
            query.as_deref().unwrap_or(""),
            page,
        )
        .await?;
    Ok(ok_json(results))
}

/// Recent activity for a user, gated by their activity visibility.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/users/{user_id}/activity",
    params(("user_id" = String, Path, description = "Target user id"), ActivityQuery),
    responses(
        (status = 200, description = "Activity summary"),
        (status = 400, description = "perTypeLimit out of range", body = Error),
        (status = 403, description = "Activity is private", body = Error),
        (status = 404, description = "Unknown or deactivated user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserActivity"
)]
#[get("/users/{user_id}/activity")]
pub async fn get_activity(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<String>,
    query: web::Query<ActivityQuery>,
) -> ApiResult<HttpResponse> {
    let target_id = parse_user_id(&path)?;
    let summary = state
        .directory
        .activity(
            principal.principal(),
            &target_id,
            query.into_inner().per_type_limit(),
        )
        .await?;
    Ok(ok_json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserDirectory;
    use crate::domain::{Error, User, UserId, UserProfile};
    use actix_web::{test as actix_test, App};
    use chrono::Utc;
    use serde_json::Value;
    use std::sync::Arc;

    fn sample_profile(id: UserId) -> UserProfile {
        UserProfile::full(User {
            id,
            username: "ada".to_owned(),
            email: Some("ada@example.com".to_owned()),
            full_name: Some("Ada Lovelace".to_owned()),
            bio: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn call(
        state: HttpState,
        request: actix_test::TestRequest,
    ) -> (actix_web::http::StatusCode, Value) {
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/api/v1/user-management")
                    .service(search_users)
                    .service(update_profile)
                    .service(get_profile)
                    .service(get_activity)
                    .service(get_user),
            ),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("json body");
        (status, value)
    }

    #[actix_web::test]
    async fn missing_profile_maps_to_enveloped_not_found() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_get_profile()
            .returning(|_, _| Err(Error::user_not_found()));
        let state = HttpState {
            directory: Arc::new(directory),
            ..HttpState::fixture()
        };

        let target = UserId::random();
        let (status, body) = call(
            state,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/user-management/users/{target}/profile")),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "user-not-found");
    }

    #[actix_web::test]
    async fn profile_response_is_enveloped_camel_case() {
        let target = UserId::random();
        let profile = sample_profile(target.clone());
        let mut directory = MockUserDirectory::new();
        directory
            .expect_get_profile()
            .returning(move |_, _| Ok(profile.clone()));
        let state = HttpState {
            directory: Arc::new(directory),
            ..HttpState::fixture()
        };

        let (status, body) = call(
            state,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/user-management/users/{target}/profile"))
                .insert_header(("X-User-Id", target.to_string())),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["username"], "ada");
        assert_eq!(body["data"]["fullName"], "Ada Lovelace");
        assert!(body["data"].get("full_name").is_none());
    }

    #[actix_web::test]
    async fn malformed_path_id_is_a_validation_error() {
        let (status, body) = call(
            HttpState::fixture(),
            actix_test::TestRequest::get()
                .uri("/api/v1/user-management/users/not-a-uuid/profile"),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation-error");
    }

    #[actix_web::test]
    async fn search_rejects_out_of_range_limit() {
        let (status, body) = call(
            HttpState::fixture(),
            actix_test::TestRequest::get()
                .uri("/api/v1/user-management/users/search?query=ada&limit=0"),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "limit must be between 1 and 100"
        );
    }

    #[actix_web::test]
    async fn username_conflict_maps_to_conflict_status() {
        let mut directory = MockUserDirectory::new();
        directory.expect_update_profile().returning(|_, _| {
            Err(Error::new(
                crate::domain::ErrorCode::UsernameConflict,
                "username already taken",
            ))
        });
        let state = HttpState {
            directory: Arc::new(directory),
            ..HttpState::fixture()
        };

        let (status, body) = call(
            state,
            actix_test::TestRequest::put()
                .uri("/api/v1/user-management/users/profile")
                .insert_header(("X-User-Id", UserId::random().to_string()))
                .set_json(serde_json::json!({"username": "ada"})),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "username-conflict");
    }
}
