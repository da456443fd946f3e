//! Shared helpers for integration tests.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::Value;
use user_service::Trace;
use user_service::domain::UserService;
use user_service::inbound::http;
use user_service::inbound::http::error::envelope_framework_errors;
use user_service::inbound::http::root::route_not_found;
use user_service::inbound::http::state::HttpState;
use user_service::outbound::persistence::InMemoryUserRepository;

/// Environment variable naming a disposable MongoDB for adapter tests.
pub const TEST_MONGO_URI_VAR: &str = "USER_API_TEST_MONGO_URI";

/// Return the test store URI, printing a skip marker when it is unset.
pub fn test_mongo_uri() -> Option<String> {
    match std::env::var(TEST_MONGO_URI_VAR) {
        Ok(uri) if !uri.trim().is_empty() => Some(uri),
        _ => {
            eprintln!("SKIP-MONGO: {TEST_MONGO_URI_VAR} is not set");
            None
        }
    }
}

/// Build the full user API over the given in-memory store.
///
/// Clones of the repository share storage, so tests keep a handle to inspect.
pub fn in_memory_app(
    repo: InMemoryUserRepository,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let service = UserService::new(Arc::new(repo));
    let state = HttpState::from_service(Arc::new(service));
    App::new()
        .app_data(web::Data::new(state))
        .wrap(envelope_framework_errors())
        .wrap(Trace)
        .configure(http::register)
        .default_service(web::route().to(route_not_found))
}

/// Read a JSON body, returning the status alongside it.
pub async fn json_of<B: MessageBody>(response: ServiceResponse<B>) -> (u16, Value) {
    let status = response.status().as_u16();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}
