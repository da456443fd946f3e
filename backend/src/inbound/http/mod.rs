//! HTTP inbound adapter exposing the user REST endpoints.

pub mod envelope;
pub mod error;
pub mod health;
pub mod root;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Largest request body the user handlers accept.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Register the welcome route and every user handler.
///
/// Bodies over [`MAX_BODY_BYTES`] are refused with 413.
/// Health probes and API docs are mounted separately by the server.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http;
///
/// let _app = App::new().configure(http::register);
/// ```
pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .service(root::welcome)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(users::list_users);
}
