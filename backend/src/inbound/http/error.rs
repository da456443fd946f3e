//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! return it directly. Every failure leaves through [`envelope::error`],
//! including the ones Actix raises itself before a handler runs.

use actix_web::dev::ServiceResponse;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::Value;
use tracing::{error, info};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};
use crate::inbound::http::envelope::{self, ERROR};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed request once. `details` stays in the log; clients only see
/// the message.
fn log_failure(err: &Error, status: StatusCode) {
    let details = err.details().unwrap_or(&Value::Null);
    if status.is_server_error() {
        error!(code = err.code().as_str(), message = err.message(), %details, "request failed");
    } else {
        info!(code = err.code().as_str(), message = err.message(), %details, "request rejected");
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        log_failure(self, status);

        let mut response = envelope::error(status, ERROR, self);
        if let Some(trace_id) = TraceId::current() {
            if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
        }
        response
    }
}

/// Re-wrap framework error replies, such as payload extractor failures, in
/// the error envelope.
///
/// Replies that are already JSON, and replies built without an error such as
/// health probes, pass through untouched.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::error::envelope_framework_errors;
///
/// let _app = App::new().wrap(envelope_framework_errors());
/// ```
pub fn envelope_framework_errors<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(rewrap_in_envelope)
}

fn is_json<B>(res: &ServiceResponse<B>) -> bool {
    res.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

fn rewrap_in_envelope<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let description = res
        .response()
        .error()
        .filter(|_| !is_json(&res))
        .map(ToString::to_string);
    let Some(description) = description else {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    };

    let status = res.status();
    let (req, _) = res.into_parts();
    let response = envelope::error(status, ERROR, &description);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
