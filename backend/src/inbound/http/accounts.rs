//! Two-phase account deletion HTTP handlers.
//!
//! ```text
//! POST   /api/v1/user-management/users/account/delete-request
//! DELETE /api/v1/user-management/users/account
//! ```

use actix_web::{delete, post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::Error;
use crate::inbound::http::auth::RequestPrincipal;
use crate::inbound::http::envelope::ok_json;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request payload for the confirm phase.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfirmDeletionRequest {
    pub confirmation_token: String,
}

/// Mint a single-use deletion-confirmation token.
#[utoipa::path(
    post,
    path = "/api/v1/user-management/users/account/delete-request",
    responses(
        (status = 200, description = "Confirmation token with its expiry"),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "Cache unreachable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "requestAccountDeletion"
)]
#[post("/users/account/delete-request")]
pub async fn request_account_deletion(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
) -> ApiResult<HttpResponse> {
    let request = state
        .lifecycle
        .request_deletion(principal.principal())
        .await?;
    Ok(ok_json(request))
}

/// Confirm deletion with the previously minted token.
#[utoipa::path(
    delete,
    path = "/api/v1/user-management/users/account",
    request_body = ConfirmDeletionRequest,
    responses(
        (status = 200, description = "Account soft-deactivated"),
        (status = 401, description = "Token expired or never requested", body = Error),
        (status = 403, description = "Token does not match", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "Cache unreachable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "confirmAccountDeletion"
)]
#[delete("/users/account")]
pub async fn confirm_account_deletion(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    payload: web::Json<ConfirmDeletionRequest>,
) -> ApiResult<HttpResponse> {
    let confirmation = state
        .lifecycle
        .confirm_deletion(principal.principal(), &payload.confirmation_token)
        .await?;
    Ok(ok_json(confirmation))
}
