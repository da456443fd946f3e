//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`UsersCommand`], [`UsersQuery`]) are what inbound adapters
//! call. Driven ports ([`UserRepository`], [`StoreHealth`]) are what outbound
//! adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod store_health;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::StoreHealth;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UpdateCounts, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{UserCreated, UserDeleted, UserUpdated, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
