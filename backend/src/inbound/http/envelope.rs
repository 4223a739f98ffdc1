//! Response envelopes shared by every API endpoint.
//!
//! Clients branch on the boolean `success` flag, not the HTTP status, so
//! success and failure bodies are both returned with 200.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Message returned for request bodies that are not valid JSON.
pub const MALFORMED_BODY: &str = "Invalid JSON body";
/// Message returned for routes that do not exist.
pub const UNKNOWN_ROUTE: &str = "Route not found";

/// Failure envelope: `{"success": false, "message": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct Failure {
    /// Always `false`.
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Profile not found")]
    pub message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Success envelope carrying only a message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Always `true`.
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Profile deleted successfully!")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

fn failure_response(message: &str) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    if let Some(trace_id) = TraceId::current() {
        builder.insert_header((TRACE_ID_HEADER, trace_id.to_string()));
    }
    builder.json(Failure::new(message))
}

/// JSON extractor configuration answering decode failures with an envelope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::envelope::json_config;
///
/// let app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected request body");
    InternalError::from_response(err, failure_response(MALFORMED_BODY)).into()
}

/// Default service for unmatched routes.
pub async fn unknown_route(req: HttpRequest) -> HttpResponse {
    debug!(method = %req.method(), path = req.path(), "unknown route");
    failure_response(UNKNOWN_ROUTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::read_envelope;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use rstest::rstest;
    use serde_json::json;

    #[derive(serde::Deserialize)]
    struct Payload {
        #[expect(dead_code, reason = "only decoded to exercise the extractor")]
        name: String,
    }

    async fn echo(_payload: web::Json<Payload>) -> HttpResponse {
        HttpResponse::Ok().json(MessageResponse::new("ok"))
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_becomes_failure_envelope() {
        let app = actix_test::init_service(
            App::new()
                .app_data(json_config())
                .route("/echo", web::post().to(echo)),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/echo")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_envelope(response).await,
            json!({ "success": false, "message": MALFORMED_BODY })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_routes_get_failure_envelope() {
        let app = actix_test::init_service(
            App::new().default_service(web::to(unknown_route)),
        )
        .await;

        let request = actix_test::TestRequest::get().uri("/api/nope").to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_envelope(response).await,
            json!({ "success": false, "message": UNKNOWN_ROUTE })
        );
    }
}
