//! HTTP adapter mapping for domain errors.
//!
//! Every failure is rendered as a `{success: false, message}` envelope with
//! status 200, which is the contract existing browser clients rely on. The
//! trace id travels in the `trace-id` header rather than the body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, TRACE_ID_HEADER};
use crate::inbound::http::envelope::Failure;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(Failure::new(self.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    #[case(Error::invalid_request("age must be between 18 and 100"))]
    #[case(Error::not_found("Profile not found"))]
    #[case(Error::conflict("Profile already exists"))]
    #[case(Error::service_unavailable("Error fetching profiles"))]
    #[actix_web::test]
    async fn every_error_is_a_200_envelope(#[case] error: Error) {
        let expected = error.message().to_owned();
        let response = ResponseError::error_response(&error);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": expected })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn details_never_reach_the_body() {
        let error = Error::internal("Error saving profile")
            .with_details(json!({ "reason": "E11000 duplicate key" }))
            .with_trace_id(TRACE_ID);

        let response = ResponseError::error_response(&error);
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = body_json(response).await;

        assert_eq!(header.as_deref(), Some(TRACE_ID));
        assert!(body.get("details").is_none());
        assert!(!body.to_string().contains("E11000"));
    }
}
