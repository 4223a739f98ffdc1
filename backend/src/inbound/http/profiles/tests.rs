//! Handler tests for the profile endpoints.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, Error as ActixError, test as actix_test, web};
use actix_http::Request;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ProfileService;
use crate::domain::ports::{FixtureLoginService, MockProfileCommand, MockProfileQuery};
use crate::domain::{Error, TRACE_ID_HEADER};
use crate::inbound::http::api_scope;
use crate::inbound::http::envelope::{json_config, unknown_route};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::read_envelope;
use crate::outbound::persistence::InMemoryProfileRepository;
use crate::Trace;

fn in_memory_state() -> HttpState {
    let service = Arc::new(ProfileService::new(
        Arc::new(InMemoryProfileRepository::new()),
        Arc::new(mockable::DefaultClock),
    ));
    HttpState::new(service.clone(), service, Arc::new(FixtureLoginService))
}

async fn app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse, Error = ActixError> {
    actix_test::init_service(
        App::new()
            .wrap(Trace)
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .service(api_scope())
            .default_service(web::to(unknown_route)),
    )
    .await
}

async fn send<S>(app: &S, request: actix_test::TestRequest) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = ActixError>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    read_envelope(response).await
}

fn create(body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/profile")
        .set_json(body)
}

#[rstest]
#[actix_web::test]
async fn create_then_fetch_round_trip() {
    let app = app(in_memory_state()).await;

    let created = send(
        &app,
        create(json!({
            "name": "Alice",
            "age": "30",
            "hobbies": "chess",
            "gender": "female",
            "location": "",
            "_id": "ignored",
            "favouriteColour": "green",
        })),
    )
    .await;
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "Profile saved successfully!");
    let id = created["profileId"].as_str().expect("profile id").to_owned();
    assert_eq!(id.len(), 24);

    let fetched = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/profile/{id}")),
    )
    .await;
    let profile = &fetched["profile"];
    assert_eq!(fetched["success"], true);
    assert_eq!(profile["_id"], id.as_str());
    assert_eq!(profile["age"], 30);
    assert_eq!(profile["hobbies"], json!(["chess"]));
    assert_eq!(profile["gender"], "female");
    assert!(profile.get("location").is_none());
    assert!(profile.get("favouriteColour").is_none());
    assert!(profile["createdAt"].as_str().is_some());
}

#[rstest]
#[case(json!({ "name": "Bob" }), "Name and age are required")]
#[case(json!({ "age": 25 }), "Name and age are required")]
#[case(json!({ "name": "Bob", "age": 0 }), "Name and age are required")]
#[case(json!({ "name": "Bob", "age": "0" }), "Name and age are required")]
#[case(json!({ "name": "Bob", "age": 17 }), "age must be between 18 and 100")]
#[case(json!({ "name": "Bob", "age": 30.5 }), "age must be a whole number")]
#[case(json!({ "name": "Bob", "age": 30, "gender": "robot" }), "gender must be one of male, female, other")]
#[actix_web::test]
async fn invalid_creates_are_rejected_and_nothing_is_stored(
    #[case] body: Value,
    #[case] message: &str,
) {
    let app = app(in_memory_state()).await;

    let rejected = send(&app, create(body)).await;
    let listed = send(&app, actix_test::TestRequest::get().uri("/api/profile")).await;

    assert_eq!(rejected, json!({ "success": false, "message": message }));
    assert_eq!(listed, json!({ "success": true, "profiles": [] }));
}

#[rstest]
#[actix_web::test]
async fn list_is_newest_first() {
    let app = app(in_memory_state()).await;
    for name in ["First", "Second"] {
        send(&app, create(json!({ "name": name, "age": 30 }))).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let listed = send(&app, actix_test::TestRequest::get().uri("/api/profile")).await;
    let names: Vec<&str> = listed["profiles"]
        .as_array()
        .expect("profiles array")
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();

    assert_eq!(names, vec!["Second", "First"]);
}

#[rstest]
#[actix_web::test]
async fn update_merges_and_null_clears() {
    let app = app(in_memory_state()).await;
    let created = send(
        &app,
        create(json!({ "name": "Alice", "age": 30, "location": "Paris", "occupation": "Engineer" })),
    )
    .await;
    let id = created["profileId"].as_str().expect("profile id").to_owned();

    let updated = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/profile/{id}"))
            .set_json(json!({ "age": 31, "location": null })),
    )
    .await;

    assert_eq!(updated["message"], "Profile updated successfully!");
    assert_eq!(updated["profile"]["age"], 31);
    assert_eq!(updated["profile"]["name"], "Alice");
    assert_eq!(updated["profile"]["occupation"], "Engineer");
    assert!(updated["profile"].get("location").is_none());
}

#[rstest]
#[actix_web::test]
async fn invalid_update_keeps_stored_profile() {
    let app = app(in_memory_state()).await;
    let created = send(&app, create(json!({ "name": "Alice", "age": 30 }))).await;
    let id = created["profileId"].as_str().expect("profile id").to_owned();

    let rejected = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/profile/{id}"))
            .set_json(json!({ "age": 150, "name": "Mallory" })),
    )
    .await;
    let fetched = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/profile/{id}")),
    )
    .await;

    assert_eq!(rejected["success"], false);
    assert_eq!(fetched["profile"]["age"], 30);
    assert_eq!(fetched["profile"]["name"], "Alice");
}

#[rstest]
#[actix_web::test]
async fn delete_twice_reports_not_found() {
    let app = app(in_memory_state()).await;
    let created = send(&app, create(json!({ "name": "Alice", "age": 30 }))).await;
    let uri = format!("/api/profile/{}", created["profileId"].as_str().expect("id"));

    let first = send(&app, actix_test::TestRequest::delete().uri(&uri)).await;
    let second = send(&app, actix_test::TestRequest::delete().uri(&uri)).await;

    assert_eq!(first, json!({ "success": true, "message": "Profile deleted successfully!" }));
    assert_eq!(second, json!({ "success": false, "message": "Profile not found" }));
}

#[rstest]
#[case("/api/profile/not-an-id")]
#[case("/api/profile/65f1c0ffee0000000000abcd")]
#[actix_web::test]
async fn unknown_or_malformed_ids_are_not_found(#[case] uri: &str) {
    let app = app(in_memory_state()).await;

    let fetched = send(&app, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(fetched, json!({ "success": false, "message": "Profile not found" }));
}

#[rstest]
#[actix_web::test]
async fn storage_failures_use_generic_message() {
    let mut query = MockProfileQuery::new();
    query
        .expect_list()
        .return_once(|| Err(Error::service_unavailable("Error fetching profiles")));
    let state = HttpState::new(
        Arc::new(MockProfileCommand::new()),
        Arc::new(query),
        Arc::new(FixtureLoginService),
    );
    let app = app(state).await;

    let listed = send(&app, actix_test::TestRequest::get().uri("/api/profile")).await;

    assert_eq!(
        listed,
        json!({ "success": false, "message": "Error fetching profiles" })
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_body_and_unknown_route_are_envelopes() {
    let app = app(in_memory_state()).await;

    let malformed = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/profile")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":"),
    )
    .await;
    let unknown = send(&app, actix_test::TestRequest::get().uri("/api/upload")).await;

    assert_eq!(malformed["success"], false);
    assert_eq!(unknown["success"], false);
}
