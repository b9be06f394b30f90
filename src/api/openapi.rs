//! OpenAPI document for the served routes.

use utoipa::OpenApi;

use crate::api::handlers::{auth, health};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::session::login,
        auth::session::logout,
        auth::session::me,
    ),
    components(schemas(
        auth::types::LoginRequest,
        auth::types::LoginResponse,
        auth::types::PublicUser,
        auth::types::FieldErrors,
        auth::types::ErrorResponse,
        auth::types::MessageResponse,
    )),
    tags(
        (name = "auth", description = "Login, logout and session lookup"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "gerbang",
        description = "Authentication and session gateway"
    )
)]
pub struct ApiDoc;
