//! Follow-graph HTTP handlers.
//!
//! ```text
//! POST   /api/v1/user-management/users/{user-id}/follow/{target-user-id}
//! DELETE /api/v1/user-management/users/{user-id}/follow/{target-user-id}
//! GET    /api/v1/user-management/users/{user-id}/followers
//! GET    /api/v1/user-management/users/{user-id}/following
//! ```
//!
//! The path `{user-id}` names who the edge belongs to; the service rejects
//! callers acting for someone else unless they carry the admin scope.

use actix_web::{delete, get, post, web, HttpResponse};

use crate::domain::Error;
use crate::inbound::http::auth::RequestPrincipal;
use crate::inbound::http::envelope::ok_json;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, PageQuery};
use crate::inbound::http::ApiResult;

/// Create the follow edge `user-id -> target-user-id`.
#[utoipa::path(
    post,
    path = "/api/v1/user-management/users/{user_id}/follow/{target_user_id}",
    params(
        ("user_id" = String, Path, description = "Acting user id"),
        ("target_user_id" = String, Path, description = "User to follow")
    ),
    responses(
        (status = 200, description = "Edge present after the call"),
        (status = 403, description = "Acting for another user, or follows disabled", body = Error),
        (status = 404, description = "Unknown target user", body = Error),
        (status = 422, description = "Self-follow attempt", body = Error)
    ),
    tags = ["follows"],
    operation_id = "followUser"
)]
#[post("/users/{user_id}/follow/{target_user_id}")]
pub async fn follow_user(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (acting, target) = path.into_inner();
    let acting_id = parse_user_id(&acting)?;
    let target_id = parse_user_id(&target)?;
    let status = state
        .social
        .follow(principal.principal(), &acting_id, &target_id)
        .await?;
    Ok(ok_json(status))
}

/// Remove the follow edge `user-id -> target-user-id`.
#[utoipa::path(
    delete,
    path = "/api/v1/user-management/users/{user_id}/follow/{target_user_id}",
    params(
        ("user_id" = String, Path, description = "Acting user id"),
        ("target_user_id" = String, Path, description = "User to unfollow")
    ),
    responses(
        (status = 200, description = "Edge absent after the call"),
        (status = 403, description = "Acting for another user", body = Error),
        (status = 404, description = "Unknown target user", body = Error),
        (status = 422, description = "Self-unfollow attempt", body = Error)
    ),
    tags = ["follows"],
    operation_id = "unfollowUser"
)]
#[delete("/users/{user_id}/follow/{target_user_id}")]
pub async fn unfollow_user(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (acting, target) = path.into_inner();
    let acting_id = parse_user_id(&acting)?;
    let target_id = parse_user_id(&target)?;
    let status = state
        .social
        .unfollow(principal.principal(), &acting_id, &target_id)
        .await?;
    Ok(ok_json(status))
}

/// Users who follow `user-id`.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/users/{user_id}/followers",
    params(("user_id" = String, Path, description = "Target user id"), PageQuery),
    responses(
        (status = 200, description = "Follower page"),
        (status = 403, description = "Listing is private", body = Error),
        (status = 404, description = "Unknown target user", body = Error)
    ),
    tags = ["follows"],
    operation_id = "listFollowers"
)]
#[get("/users/{user_id}/followers")]
pub async fn list_followers(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let target_id = parse_user_id(&path)?;
    let page = query.into_inner().into_page_request()?;
    let followers = state
        .social
        .followers(principal.principal(), &target_id, page)
        .await?;
    Ok(ok_json(followers))
}

/// Users `user-id` follows.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/users/{user_id}/following",
    params(("user_id" = String, Path, description = "Target user id"), PageQuery),
    responses(
        (status = 200, description = "Following page"),
        (status = 403, description = "Listing is private", body = Error),
        (status = 404, description = "Unknown target user", body = Error)
    ),
    tags = ["follows"],
    operation_id = "listFollowing"
)]
#[get("/users/{user_id}/following")]
pub async fn list_following(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let target_id = parse_user_id(&path)?;
    let page = query.into_inner().into_page_request()?;
    let following = state
        .social
        .following(principal.principal(), &target_id, page)
        .await?;
    Ok(ok_json(following))
}
