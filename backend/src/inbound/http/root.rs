//! Welcome text and the catch-all for unknown routes.

use actix_web::{HttpRequest, HttpResponse, get};

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Plain-text greeting served at `/`.
pub const WELCOME_TEXT: &str = "Welcome to the User API!";

/// Greet callers. This is the only reply that bypasses the envelope.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome text", body = String, content_type = "text/plain")),
    tags = ["users"],
    operation_id = "welcome"
)]
#[get("/")]
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(WELCOME_TEXT)
}

/// Default service: unknown routes get a 404 envelope.
pub async fn route_not_found(request: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "no route for {} {}",
        request.method(),
        request.path()
    )))
}
