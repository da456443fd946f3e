//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every user endpoint, the health probes, and the
//! schema wrappers from [`crate::inbound::http::schemas`]. The document is
//! served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    ErrorEnvelope, UserCreatedEnvelope, UserCreatedSchema, UserDeletedEnvelope, UserDeletedSchema,
    UserEnvelope, UserSchema, UserUpdatedEnvelope, UserUpdatedSchema, UsersEnvelope,
};
use crate::inbound::http::users::UserRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        description = "CRUD interface for users stored in MongoDB. JSON replies share the \
                       `{status, message, data}` envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::root::welcome,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserRequest,
        UserSchema,
        UserCreatedSchema,
        UserUpdatedSchema,
        UserDeletedSchema,
        UserCreatedEnvelope,
        UserEnvelope,
        UsersEnvelope,
        UserUpdatedEnvelope,
        UserDeletedEnvelope,
        ErrorEnvelope,
    )),
    tags(
        (name = "users", description = "Operations on the user resource"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const USER_SCHEMA_NAME: &str = "crate.domain.User";

    #[rstest]
    #[case("/")]
    #[case("/user")]
    #[case("/user/{userId}")]
    #[case("/users")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }

    #[rstest]
    fn user_schema_lists_descriptive_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let RefOr::T(Schema::Object(user)) = schemas.get(USER_SCHEMA_NAME).expect("User schema")
        else {
            panic!("expected Object schema");
        };

        for field in ["id", "name", "location", "title"] {
            assert!(user.properties.contains_key(field), "missing {field}");
        }
    }
}
