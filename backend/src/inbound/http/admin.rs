//! Admin HTTP handlers.
//!
//! ```text
//! GET  /api/v1/user-management/admin/users/stats
//! POST /api/v1/user-management/admin/cache/clear
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, Principal};
use crate::inbound::http::auth::RequestPrincipal;
use crate::inbound::http::envelope::ok_json;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request payload for the cache-clear endpoint.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct CacheClearRequest {
    /// Redis key pattern; `*` when absent.
    pub pattern: Option<String>,
}

fn require_admin(principal: &Principal) -> Result<(), Error> {
    if principal.is_anonymous() {
        return Err(Error::unauthorized("authentication required"));
    }
    if !principal.is_admin() {
        return Err(Error::forbidden("admin scope required"));
    }
    Ok(())
}

/// Aggregate user statistics.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/admin/users/stats",
    responses(
        (status = 200, description = "User statistics"),
        (status = 401, description = "Authentication required", body = Error),
        (status = 403, description = "Admin scope required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "getUserStats"
)]
#[get("/admin/users/stats")]
pub async fn get_user_stats(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
) -> ApiResult<HttpResponse> {
    let stats = state.directory.stats(principal.principal()).await?;
    Ok(ok_json(stats))
}

/// Clear cache keys matching a pattern.
#[utoipa::path(
    post,
    path = "/api/v1/user-management/admin/cache/clear",
    request_body = CacheClearRequest,
    responses(
        (status = 200, description = "Number of cleared keys"),
        (status = 401, description = "Authentication required", body = Error),
        (status = 403, description = "Admin scope required", body = Error),
        (status = 503, description = "Cache unreachable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "clearCache"
)]
#[post("/admin/cache/clear")]
pub async fn clear_cache(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    payload: Option<web::Json<CacheClearRequest>>,
) -> ApiResult<HttpResponse> {
    require_admin(principal.principal())?;
    let pattern = payload
        .map(web::Json::into_inner)
        .unwrap_or_default()
        .pattern
        .unwrap_or_else(|| "*".to_owned());
    let cleared = state
        .cache
        .clear_pattern(&pattern)
        .await
        .map_err(|err| Error::cache_unavailable(err.to_string()))?;
    Ok(ok_json(json!({ "pattern": pattern, "clearedKeys": cleared })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCacheAdmin, MockUserDirectory};
    use crate::domain::{UserId, UserStats};
    use actix_web::{test as actix_test, App};
    use serde_json::Value;
    use std::sync::Arc;

    async fn call(
        state: HttpState,
        request: actix_test::TestRequest,
    ) -> (actix_web::http::StatusCode, Value) {
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/api/v1/user-management")
                    .service(get_user_stats)
                    .service(clear_cache),
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
    async fn stats_are_enveloped_camel_case() {
        let mut directory = MockUserDirectory::new();
        directory.expect_stats().returning(|_| {
            Ok(UserStats {
                total_users: 10,
                active_users: 8,
                inactive_users: 2,
                new_users_today: 1,
                new_users_this_week: 3,
                new_users_this_month: 5,
            })
        });
        let state = HttpState {
            directory: Arc::new(directory),
            ..HttpState::fixture()
        };

        let (status, body) = call(
            state,
            actix_test::TestRequest::get()
                .uri("/api/v1/user-management/admin/users/stats")
                .insert_header(("X-User-Id", UserId::random().to_string()))
                .insert_header(("X-User-Role", "admin")),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["data"]["totalUsers"], 10);
        assert_eq!(body["data"]["newUsersThisWeek"], 3);
    }

    #[actix_web::test]
    async fn cache_clear_defaults_to_star_pattern() {
        let mut cache = MockCacheAdmin::new();
        cache
            .expect_clear_pattern()
            .withf(|pattern| pattern == "*")
            .returning(|_| Ok(4));
        let state = HttpState {
            cache: Arc::new(cache),
            ..HttpState::fixture()
        };

        let (status, body) = call(
            state,
            actix_test::TestRequest::post()
                .uri("/api/v1/user-management/admin/cache/clear")
                .insert_header(("X-User-Id", UserId::random().to_string()))
                .insert_header(("X-User-Role", "admin"))
                .set_json(serde_json::json!({})),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["data"]["clearedKeys"], 4);
        assert_eq!(body["data"]["pattern"], "*");
    }

    #[actix_web::test]
    async fn cache_clear_accepts_a_bodyless_request() {
        let mut cache = MockCacheAdmin::new();
        cache
            .expect_clear_pattern()
            .withf(|pattern| pattern == "*")
            .returning(|_| Ok(0));
        let state = HttpState {
            cache: Arc::new(cache),
            ..HttpState::fixture()
        };

        let (status, body) = call(
            state,
            actix_test::TestRequest::post()
                .uri("/api/v1/user-management/admin/cache/clear")
                .insert_header(("X-User-Id", UserId::random().to_string()))
                .insert_header(("X-User-Role", "admin")),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["data"]["pattern"], "*");
    }

    #[actix_web::test]
    async fn cache_clear_rejects_non_admin_callers() {
        let (status, body) = call(
            HttpState::fixture(),
            actix_test::TestRequest::post()
                .uri("/api/v1/user-management/admin/cache/clear")
                .insert_header(("X-User-Id", UserId::random().to_string()))
                .set_json(serde_json::json!({})),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "forbidden");
    }

    #[actix_web::test]
    async fn cache_clear_rejects_anonymous_callers() {
        let (status, body) = call(
            HttpState::fixture(),
            actix_test::TestRequest::post()
                .uri("/api/v1/user-management/admin/cache/clear")
                .set_json(serde_json::json!({})),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "unauthorized");
    }
}
