//! Builders wiring the MongoDB adapters into handler and health state.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use user_service::domain::UserService;
use user_service::inbound::http::health::HealthState;
use user_service::inbound::http::state::HttpState;
use user_service::outbound::persistence::{MongoGateway, MongoUserRepository};

/// Build handler state backed by the `users` collection.
pub fn build_http_state(gateway: &MongoGateway, operation_timeout: Duration) -> HttpState {
    let repository = MongoUserRepository::new(gateway).with_operation_timeout(operation_timeout);
    let service = UserService::new(Arc::new(repository));
    HttpState::from_service(Arc::new(service))
}

/// Build probe state whose readiness check pings the store.
pub fn build_health_state(gateway: &MongoGateway) -> web::Data<HealthState> {
    web::Data::new(HealthState::new().with_store(Arc::new(gateway.clone())))
}
