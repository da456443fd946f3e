//! Domain primitives, ports, and services.
//!
//! Purpose: define the user aggregate, its validation rules, and the
//! transport-agnostic error type. Adapters on either side depend on the
//! ports declared in [`ports`]; nothing in here knows about HTTP or MongoDB
//! wire details.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload mapped by inbound adapters.
//! - User / UserId / UserProfile: the single persisted resource.
//! - UserService: orchestrates the CRUD use-cases over a repository port.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserField, UserId, UserIdError, UserProfile, UserValidationError};
pub use self::user_service::UserService;
