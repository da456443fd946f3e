//! MongoDB persistence adapters.
//!
//! # Architecture
//!
//! - **Gateway**: [`MongoGateway`] owns the driver client. It is connected
//!   once at startup, verified with a `ping`, and cloned into every adapter.
//!   The driver's internal pool makes the clones safe to share across
//!   requests.
//! - **Document operations**: `document_ops` wraps the driver's
//!   single-document calls and cursor draining in per-call timeouts.
//! - **Internal models**: stored document shapes (`models.rs`) never leak
//!   into the domain layer.
//! - **Strongly typed errors**: driver failures are mapped to
//!   [`crate::domain::ports::UserPersistenceError`].
//!
//! # Example
//!
//! ```no_run
//! use user_service::outbound::persistence::{GatewaySettings, MongoGateway, MongoUserRepository};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = GatewaySettings::new("mongodb://localhost:27017", "golangAPI");
//! let gateway = MongoGateway::connect(&settings).await?;
//! let repo = MongoUserRepository::new(&gateway);
//! # Ok(())
//! # }
//! ```

pub mod document_ops;
mod gateway;
#[cfg(any(test, feature = "test-support"))]
mod memory_user_repository;
mod models;
mod mongo_user_repository;

pub use document_ops::{DEFAULT_OPERATION_TIMEOUT, DocumentStoreError, UpdateSummary};
pub use gateway::{DEFAULT_CONNECT_TIMEOUT, GatewayError, GatewaySettings, MongoGateway};
#[cfg(any(test, feature = "test-support"))]
pub use memory_user_repository::InMemoryUserRepository;
pub use mongo_user_repository::{MongoUserRepository, USERS_COLLECTION};
