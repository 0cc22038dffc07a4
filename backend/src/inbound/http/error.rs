//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent enveloped JSON responses
//! and status codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

use super::envelope::ApiEnvelope;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationError | ErrorCode::InvalidCategory => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized | ErrorCode::TokenExpiredOrMissing => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden | ErrorCode::TokenInvalid => StatusCode::FORBIDDEN,
        ErrorCode::UserNotFound | ErrorCode::NotificationNotFound => StatusCode::NOT_FOUND,
        ErrorCode::UsernameConflict => StatusCode::CONFLICT,
        ErrorCode::CannotFollowSelf | ErrorCode::CannotUnfollowSelf => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorCode::CacheUnavailable | ErrorCode::ServiceUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let redacted = Error::internal("internal server error");
        // Clients quote the trace id back when reporting failures.
        match TraceId::current() {
            Some(trace_id) => redacted.with_details(json!({ "traceId": trace_id.to_string() })),
            None => redacted,
        }
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = %self.message(), "internal error surfaced to client");
        }
        HttpResponse::build(self.status_code())
            .json(ApiEnvelope::<serde_json::Value>::failure(redact_if_internal(
                self,
            )))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Error::validation("limit must be between 1 and 100"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("authentication required"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("profile is private"), StatusCode::FORBIDDEN)]
    #[case(Error::user_not_found(), StatusCode::NOT_FOUND)]
    #[case(
        Error::new(ErrorCode::UsernameConflict, "username already taken"),
        StatusCode::CONFLICT
    )]
    #[case(
        Error::new(ErrorCode::CannotFollowSelf, "cannot follow yourself"),
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    #[case(
        Error::new(ErrorCode::TokenExpiredOrMissing, "no deletion request on record"),
        StatusCode::UNAUTHORIZED
    )]
    #[case(
        Error::new(ErrorCode::TokenInvalid, "token does not match"),
        StatusCode::FORBIDDEN
    )]
    #[case(Error::cache_unavailable("redis down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn domain_codes_map_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted_in_the_body() {
        let response = Error::internal("connection string was postgres://secret").error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "internal-error");
        assert_eq!(value["error"]["message"], "internal server error");
    }

    #[actix_web::test]
    async fn internal_errors_carry_the_trace_id_when_in_scope() {
        let trace_id: TraceId = uuid::Uuid::new_v4().to_string().parse().expect("trace id");
        let response = TraceId::scope(trace_id, async {
            Error::internal("boom").error_response()
        })
        .await;
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["error"]["details"]["traceId"], trace_id.to_string());
    }

    #[actix_web::test]
    async fn client_errors_keep_message_and_details() {
        let response = Error::validation("limit must be between 1 and 100")
            .with_details(json!({"field": "limit"}))
            .error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["error"]["message"], "limit must be between 1 and 100");
        assert_eq!(value["error"]["details"]["field"], "limit");
    }
}
