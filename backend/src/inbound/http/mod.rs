//! HTTP inbound adapter exposing the profile REST endpoints.

pub mod envelope;
pub mod error;
pub mod health;
pub mod login;
pub mod profiles;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// The `/api` scope with every envelope-returning endpoint.
///
/// Callers attach [`state::HttpState`] and [`envelope::json_config`] as app
/// data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::{api_scope, envelope::json_config};
///
/// let app = App::new().app_data(json_config()).service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(profiles::create_profile)
        .service(profiles::list_profiles)
        .service(profiles::get_profile)
        .service(profiles::update_profile)
        .service(profiles::delete_profile)
        .service(login::login)
}
