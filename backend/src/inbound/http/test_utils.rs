//! Test helpers for inbound HTTP components.

use actix_web::body::{MessageBody, to_bytes};
use actix_web::dev::ServiceResponse;
use serde_json::Value;

/// Read a finished response body as JSON.
pub async fn read_envelope<B>(response: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    let bytes = to_bytes(response.into_body())
        .await
        .unwrap_or_else(|_| panic!("response body should be readable"));
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
