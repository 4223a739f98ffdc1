//! Login endpoint for the browser form.
//!
//! ```text
//! POST /api/login {"username":"admin","password":"password"}
//! ```
//!
//! No session is issued; the response only reports whether the credentials
//! were accepted.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::MessageResponse;
use crate::inbound::http::state::HttpState;

pub const LOGIN_SUCCESSFUL: &str = "Login successful";

/// Login request body. Missing keys are treated as empty strings.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyUsername => ("username", "empty_username"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Check the submitted credentials.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login result; rejected credentials use the Failure envelope", body = MessageResponse),
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    state.login.authenticate(&credentials).await?;
    Ok(web::Json(MessageResponse::new(LOGIN_SUCCESSFUL)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{FixtureLoginService, MockProfileCommand, MockProfileQuery};
    use crate::inbound::http::envelope::json_config;
    use crate::inbound::http::test_utils::read_envelope;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    fn state() -> HttpState {
        HttpState::new(
            Arc::new(MockProfileCommand::new()),
            Arc::new(MockProfileQuery::new()),
            Arc::new(FixtureLoginService),
        )
    }

    async fn post_login(body: Value) -> Value {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .app_data(json_config())
                .service(web::scope("/api").service(login)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(&body)
            .to_request();
        read_envelope(actix_test::call_service(&app, request).await).await
    }

    #[rstest]
    #[case(json!({"username": "admin", "password": "password"}), true, LOGIN_SUCCESSFUL)]
    #[case(json!({"username": "admin", "password": "nope"}), false, "Invalid credentials")]
    #[case(json!({"password": "password"}), false, "username must not be empty")]
    #[case(json!({"username": "admin", "password": ""}), false, "password must not be empty")]
    #[actix_web::test]
    async fn login_reports_outcome_in_envelope(
        #[case] body: Value,
        #[case] success: bool,
        #[case] message: &str,
    ) {
        let envelope = post_login(body).await;
        assert_eq!(envelope, json!({ "success": success, "message": message }));
    }
}
