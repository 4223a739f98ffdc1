//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every profile and login endpoint, the health probes,
//! and the envelope schemas they return. Domain enums are described through
//! the wrappers in [`crate::inbound::http::schemas`] so the domain stays free
//! of utoipa.
//!
//! The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::envelope::{Failure, MessageResponse};
use crate::inbound::http::login::LoginRequest;
use crate::inbound::http::profiles::{
    ProfileCreatedResponse, ProfileFetchedResponse, ProfileListResponse, ProfileRequest,
    ProfileResponse, ProfileUpdatedResponse,
};
use crate::inbound::http::schemas::{GenderSchema, InterestedInSchema};
use utoipa::openapi::Server;
use utoipa::{Modify, OpenApi};

/// Document the `trace-id` header that every `/api` response carries.
struct TraceHeaderAddon;

impl Modify for TraceHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let description = "Every `/api` response is HTTP 200 and carries a `trace-id` header; \
                           the `success` field distinguishes outcomes.";
        let info = &mut openapi.info;
        info.description = Some(match info.description.take() {
            Some(existing) => format!("{existing}\n\n{description}"),
            None => description.to_owned(),
        });
        if openapi.servers.is_none() {
            openapi.servers = Some(vec![Server::new("/")]);
        }
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&TraceHeaderAddon),
    info(
        title = "Profile backend API",
        description = "CRUD over dating profiles with a fixed-credential login check.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::profiles::create_profile,
        crate::inbound::http::profiles::list_profiles,
        crate::inbound::http::profiles::get_profile,
        crate::inbound::http::profiles::update_profile,
        crate::inbound::http::profiles::delete_profile,
        crate::inbound::http::login::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ProfileRequest,
        ProfileResponse,
        ProfileCreatedResponse,
        ProfileListResponse,
        ProfileFetchedResponse,
        ProfileUpdatedResponse,
        LoginRequest,
        MessageResponse,
        Failure,
        GenderSchema,
        InterestedInSchema,
    )),
    tags(
        (name = "profiles", description = "Create, read, update and delete profiles"),
        (name = "auth", description = "Credential check"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_named<'a>(doc: &'a utoipa::openapi::OpenApi, name: &str) -> &'a RefOr<Schema> {
        doc.components
            .as_ref()
            .expect("components")
            .schemas
            .get(name)
            .unwrap_or_else(|| panic!("schema {name} registered"))
    }

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("ProfileResponse", "_id")]
    #[case("ProfileResponse", "createdAt")]
    #[case("ProfileResponse", "interestedIn")]
    #[case("ProfileCreatedResponse", "profileId")]
    #[case("ProfileListResponse", "profiles")]
    #[case("Failure", "success")]
    #[case("Failure", "message")]
    fn envelope_schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        assert_object_schema_has_field(schema_named(&doc, schema), field);
    }

    #[rstest]
    fn every_profile_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/profile"));
        assert!(paths.contains_key("/api/profile/{id}"));
        assert!(paths.contains_key("/api/login"));
        assert!(paths.contains_key("/health/ready"));
    }

    #[rstest]
    fn description_mentions_trace_header() {
        let doc = ApiDoc::openapi();
        let description = doc.info.description.expect("description set");
        assert!(description.contains("trace-id"));
    }
}
