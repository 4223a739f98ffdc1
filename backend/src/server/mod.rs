//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ProfileService;
use backend::domain::ports::{
    FixtureLoginService, ProfileCommand, ProfileQuery, ProfileRepository,
};
use backend::inbound::http::api_scope;
use backend::inbound::http::envelope::{json_config, unknown_route};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{InMemoryProfileRepository, MongoProfileRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

fn profile_ports<R>(repo: R) -> (Arc<dyn ProfileCommand>, Arc<dyn ProfileQuery>)
where
    R: ProfileRepository + 'static,
{
    let service = Arc::new(ProfileService::new(Arc::new(repo), Arc::new(DefaultClock)));
    (service.clone(), service)
}

/// Build handler state over MongoDB when a store is attached, otherwise over
/// process memory.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let (command, query) = match &config.store {
        Some(store) => profile_ports(MongoProfileRepository::new(store)),
        None => profile_ports(InMemoryProfileRepository::new()),
    };
    HttpState::new(command, query, Arc::new(FixtureLoginService))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(unknown_route))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once the listener is bound.
/// - `config`: pre-built [`ServerConfig`] with the bind address and optional store.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(config));

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Wiring tests for the assembled application.

    use super::*;
    use actix_web::test;
    use rstest::rstest;
    use std::net::SocketAddr;

    fn in_memory_app_parts() -> (web::Data<HealthState>, web::Data<HttpState>) {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        (health, web::Data::new(build_http_state(&config)))
    }

    #[rstest]
    #[actix_web::test]
    async fn assembled_app_serves_profiles_and_probes() {
        let (health, state) = in_memory_app_parts();
        let app = test::init_service(build_app(health, state)).await;

        let list = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/profile").to_request(),
        )
        .await;
        assert!(list.status().is_success());
        assert!(list.headers().contains_key("trace-id"));
        let body: serde_json::Value = test::read_body_json(list).await;
        assert_eq!(body["success"], true);

        let ready_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert!(ready_res.status().is_success());
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_paths_get_an_envelope() {
        let (health, state) = in_memory_app_parts();
        let app = test::init_service(build_app(health, state)).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
    }
}
