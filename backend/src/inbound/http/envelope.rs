//! Uniform JSON envelope for every reply.
//!
//! Success and failure share one shape, `{status, message, data}`: `message`
//! is `"success"` or `"error"` and `data` carries either the payload or the
//! textual description of the failure.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// `message` value for successful replies.
pub const SUCCESS: &str = "success";
/// `message` value for failed replies.
pub const ERROR: &str = "error";

/// Wire shape shared by every JSON reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// HTTP status code repeated in the body.
    pub status: u16,
    /// Outcome marker.
    pub message: String,
    /// Payload or error description.
    pub data: T,
}

impl<T> Envelope<T> {
    fn new(status: StatusCode, message: &str, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: message.to_owned(),
            data,
        }
    }
}

/// Build a successful reply carrying `data`.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use user_service::inbound::http::envelope::{self, SUCCESS};
///
/// let response = envelope::success(StatusCode::CREATED, SUCCESS, serde_json::json!({"ok": true}));
/// assert_eq!(response.status(), StatusCode::CREATED);
/// ```
pub fn success<T: Serialize>(status: StatusCode, message: &str, data: T) -> HttpResponse {
    HttpResponse::build(status).json(Envelope::new(status, message, data))
}

/// Build a failed reply whose `data` is the error's display text.
pub fn error<E: std::fmt::Display + ?Sized>(
    status: StatusCode,
    message: &str,
    err: &E,
) -> HttpResponse {
    HttpResponse::build(status).json(Envelope::new(status, message, err.to_string()))
}
