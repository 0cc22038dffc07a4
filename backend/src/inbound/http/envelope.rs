//! Response envelope shared by every JSON endpoint.
//!
//! Success bodies are `{ "success": true, "data": ... }`; failures carry the
//! domain error under `error` instead. Handlers build the success shape here
//! and the failure shape comes from the `ResponseError` impl in
//! [`super::error`].

use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Error;

/// Envelope wrapping every response body.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
}

impl<T: Serialize> ApiEnvelope<T> {
    /// A successful envelope carrying `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed envelope carrying `error`.
    pub fn failure(error: Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// 200 response with an enveloped payload.
pub fn ok_json<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiEnvelope::data(data))
}

/// 206 response with an enveloped payload, used for partial bulk deletes.
pub fn partial_json<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::PartialContent().json(ApiEnvelope::data(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Value};

    #[rstest]
    fn success_envelope_omits_error_field() {
        let value = serde_json::to_value(ApiEnvelope::data(json!({"n": 1}))).expect("serialise");
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["n"], 1);
        assert!(value.get("error").is_none());
    }

    #[rstest]
    fn failure_envelope_omits_data_field() {
        let envelope = ApiEnvelope::<Value>::failure(Error::user_not_found());
        let value = serde_json::to_value(envelope).expect("serialise");
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "user-not-found");
        assert!(value.get("data").is_none());
    }
}
