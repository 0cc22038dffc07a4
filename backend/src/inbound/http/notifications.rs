//! Notification inbox HTTP handlers.
//!
//! ```text
//! GET    /api/v1/user-management/notifications
//! DELETE /api/v1/user-management/notifications
//! PUT    /api/v1/user-management/notifications/{id}/read
//! PUT    /api/v1/user-management/notifications/read-all
//! ```
//!
//! Bulk delete answers 206 when only part of the requested set transitioned;
//! the body always echoes the ids that did.

use actix_web::{delete, get, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{DeletionOutcome, Error};
use crate::inbound::http::auth::RequestPrincipal;
use crate::inbound::http::envelope::{ok_json, partial_json};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::PageQuery;
use crate::inbound::http::ApiResult;

/// Request payload for the bulk delete endpoint.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteNotificationsRequest {
    pub ids: Vec<Uuid>,
}

/// The caller's non-deleted notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/user-management/notifications",
    params(PageQuery),
    responses(
        (status = 200, description = "Notification page"),
        (status = 400, description = "Bad pagination", body = Error),
        (status = 401, description = "Authentication required", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = query.into_inner().into_page_request()?;
    let notifications = state
        .notifications
        .list(principal.principal(), page)
        .await?;
    Ok(ok_json(notifications))
}

/// Soft-delete a set of notifications.
#[utoipa::path(
    delete,
    path = "/api/v1/user-management/notifications",
    request_body = DeleteNotificationsRequest,
    responses(
        (status = 200, description = "Every requested id transitioned"),
        (status = 206, description = "Only a subset transitioned"),
        (status = 400, description = "Empty id list", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "No requested id transitioned", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "deleteNotifications"
)]
#[delete("/notifications")]
pub async fn delete_notifications(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    payload: web::Json<DeleteNotificationsRequest>,
) -> ApiResult<HttpResponse> {
    let deletion = state
        .notifications
        .delete_many(principal.principal(), payload.into_inner().ids)
        .await?;
    let body = json!({ "deletedNotificationIds": deletion.deleted_ids });
    Ok(match deletion.outcome {
        DeletionOutcome::Partial => partial_json(body),
        _ => ok_json(body),
    })
}

/// Mark one notification read; repeated marking is a no-op success.
#[utoipa::path(
    put,
    path = "/api/v1/user-management/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification is read"),
        (status = 401, description = "Authentication required", body = Error),
        (status = 404, description = "No live notification with this id", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[put("/notifications/{id}/read")]
pub async fn mark_notification_read(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    state
        .notifications
        .mark_read(principal.principal(), id)
        .await?;
    Ok(ok_json(json!({ "id": id, "isRead": true })))
}

/// Mark every unread notification read.
#[utoipa::path(
    put,
    path = "/api/v1/user-management/notifications/read-all",
    responses(
        (status = 200, description = "Transitioned notification ids"),
        (status = 401, description = "Authentication required", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "markAllNotificationsRead"
)]
#[put("/notifications/read-all")]
pub async fn mark_all_notifications_read(
    state: web::Data<HttpState>,
    principal: RequestPrincipal,
) -> ApiResult<HttpResponse> {
    let ids = state
        .notifications
        .mark_all_read(principal.principal())
        .await?;
    Ok(ok_json(json!({ "readNotificationIds": ids })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockNotificationInbox;
    use crate::domain::{Error, NotificationDeletion, UserId};
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
                    .service(mark_all_notifications_read)
                    .service(mark_notification_read)
                    .service(list_notifications)
                    .service(delete_notifications),
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
    async fn zero_limit_is_rejected_before_the_port_runs() {
        let user = UserId::random();
        let (status, body) = call(
            HttpState::fixture(),
            actix_test::TestRequest::get()
                .uri("/api/v1/user-management/notifications?limit=0")
                .insert_header(("X-User-Id", user.to_string())),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation-error");
        assert_eq!(body["error"]["message"], "limit must be between 1 and 100");
    }

    #[actix_web::test]
    async fn partial_delete_answers_partial_content() {
        let survivor = Uuid::new_v4();
        let missing = Uuid::new_v4();
        let mut inbox = MockNotificationInbox::new();
        inbox
            .expect_delete_many()
            .returning(move |_, _| Ok(NotificationDeletion::classify(2, vec![survivor])));
        let state = HttpState {
            notifications: Arc::new(inbox),
            ..HttpState::fixture()
        };

        let (status, body) = call(
            state,
            actix_test::TestRequest::delete()
                .uri("/api/v1/user-management/notifications")
                .insert_header(("X-User-Id", UserId::random().to_string()))
                .set_json(json!({ "ids": [survivor, missing] })),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::PARTIAL_CONTENT);
        assert_eq!(
            body["data"]["deletedNotificationIds"],
            json!([survivor.to_string()])
        );
    }

    #[actix_web::test]
    async fn full_delete_answers_ok() {
        let id = Uuid::new_v4();
        let mut inbox = MockNotificationInbox::new();
        inbox
            .expect_delete_many()
            .returning(move |_, _| Ok(NotificationDeletion::classify(1, vec![id])));
        let state = HttpState {
            notifications: Arc::new(inbox),
            ..HttpState::fixture()
        };

        let (status, body) = call(
            state,
            actix_test::TestRequest::delete()
                .uri("/api/v1/user-management/notifications")
                .insert_header(("X-User-Id", UserId::random().to_string()))
                .set_json(json!({ "ids": [id] })),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[actix_web::test]
    async fn all_missing_delete_answers_not_found() {
        let mut inbox = MockNotificationInbox::new();
        inbox.expect_delete_many().returning(|_, ids| {
            Err(
                Error::notification_not_found("no matching notifications found")
                    .with_details(json!({ "requestedIds": ids })),
            )
        });
        let state = HttpState {
            notifications: Arc::new(inbox),
            ..HttpState::fixture()
        };

        let (status, body) = call(
            state,
            actix_test::TestRequest::delete()
                .uri("/api/v1/user-management/notifications")
                .insert_header(("X-User-Id", UserId::random().to_string()))
                .set_json(json!({ "ids": [Uuid::new_v4()] })),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "notification-not-found");
        assert!(body["error"]["details"]["requestedIds"].is_array());
    }

    #[actix_web::test]
    async fn read_all_echoes_transitioned_ids() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let expected = ids.clone();
        let mut inbox = MockNotificationInbox::new();
        inbox
            .expect_mark_all_read()
            .returning(move |_| Ok(ids.clone()));
        let state = HttpState {
            notifications: Arc::new(inbox),
            ..HttpState::fixture()
        };

        let (status, body) = call(
            state,
            actix_test::TestRequest::put()
                .uri("/api/v1/user-management/notifications/read-all")
                .insert_header(("X-User-Id", UserId::random().to_string())),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(
            body["data"]["readNotificationIds"],
            json!(expected
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>())
        );
    }
}
