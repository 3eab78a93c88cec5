//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the profile endpoint, the health probes, and the
//! request, response, and error envelopes. The document is served by Swagger
//! UI in debug builds and exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::profile::{ProfileRequest, ProfileResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Profile backend API",
        description = "Generates short personality profiles from a Reddit user's public comments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::profile::create_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ProfileRequest, ProfileResponse, ErrorResponse)),
    tags(
        (name = "profile", description = "Personality profile generation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

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
    #[case("ProfileRequest", "username")]
    #[case("ProfileResponse", "profile")]
    #[case("ErrorResponse", "error")]
    fn schemas_expose_their_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/profile")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn profile_endpoint_documents_every_error_status() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/profile").expect("profile path");
        let operation = item.post.as_ref().expect("post operation");
        for status in ["200", "400", "401", "404", "500"] {
            assert!(
                operation.responses.responses.contains_key(status),
                "missing response {status}"
            );
        }
    }
}
