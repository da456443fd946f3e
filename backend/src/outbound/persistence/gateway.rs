//! Connection bootstrap for the MongoDB document store.
//!
//! The gateway is created once per process. Connecting is bounded by a
//! connect budget that covers both server selection and the follow-up
//! `ping`, so a misconfigured URI fails startup instead of hanging it.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::domain::ports::StoreHealth;

/// Default budget for connecting and for liveness checks.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const APP_NAME: &str = "user-service";

/// Errors raised while bootstrapping or probing the document store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The connection string could not be parsed.
    #[error("invalid document store URI: {message}")]
    InvalidUri { message: String },

    /// The driver rejected the connection or the `ping` command.
    #[error("document store connection failed: {message}")]
    Connect { message: String },

    /// The store did not answer within the connect budget.
    #[error("document store did not answer within {budget:?}")]
    Timeout { budget: Duration },
}

impl GatewayError {
    /// Create an invalid URI error with the given message.
    pub fn invalid_uri(message: impl Into<String>) -> Self {
        Self::InvalidUri {
            message: message.into(),
        }
    }

    /// Create a connection error with the given message.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }
}

/// Connection settings for [`MongoGateway`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use user_service::outbound::persistence::GatewaySettings;
///
/// let settings = GatewaySettings::new("mongodb://localhost:27017", "golangAPI")
///     .with_connect_timeout(Duration::from_secs(3));
/// assert_eq!(settings.database(), "golangAPI");
/// ```
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    uri: String,
    database: String,
    connect_timeout: Duration,
}

impl GatewaySettings {
    /// Create settings for the given URI and database name.
    ///
    /// The connect budget defaults to [`DEFAULT_CONNECT_TIMEOUT`].
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set the budget for connecting and for liveness checks.
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database holding the service's collections.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Budget for connecting and for liveness checks.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Shared handle to the document store.
///
/// Cloning is cheap; every clone shares the driver's connection pool.
#[derive(Clone, Debug)]
pub struct MongoGateway {
    client: Client,
    database: Database,
    connect_timeout: Duration,
}

impl MongoGateway {
    /// Connect to the store and verify it answers a `ping`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidUri`] for unparsable URIs,
    /// [`GatewayError::Connect`] when the driver or the `ping` fails, and
    /// [`GatewayError::Timeout`] when the budget elapses.
    pub async fn connect(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        let budget = settings.connect_timeout();
        let parse = async { ClientOptions::parse(settings.uri()).await };
        let mut options = match timeout(budget, parse).await {
            Ok(parsed) => parsed.map_err(|err| GatewayError::invalid_uri(err.to_string()))?,
            Err(_) => return Err(GatewayError::Timeout { budget }),
        };
        options.app_name = Some(APP_NAME.to_owned());
        options.connect_timeout = Some(budget);
        options.server_selection_timeout = Some(budget);

        let client =
            Client::with_options(options).map_err(|err| GatewayError::connect(err.to_string()))?;
        let gateway = Self {
            database: client.database(settings.database()),
            client,
            connect_timeout: budget,
        };
        gateway.ping().await?;

        info!(database = settings.database(), "connected to document store");
        Ok(gateway)
    }

    /// Run the `ping` command against the `admin` database.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Connect`] when the command fails and
    /// [`GatewayError::Timeout`] when the connect budget elapses.
    pub async fn ping(&self) -> Result<(), GatewayError> {
        let admin = self.client.database("admin");
        let command = async move { admin.run_command(doc! { "ping": 1 }).await };
        match timeout(self.connect_timeout, command).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(GatewayError::connect(err.to_string())),
            Err(_) => Err(GatewayError::Timeout {
                budget: self.connect_timeout,
            }),
        }
    }

    /// Typed handle to a collection in the configured database.
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.database.collection(name)
    }
}

#[async_trait]
impl StoreHealth for MongoGateway {
    async fn is_reachable(&self) -> bool {
        match self.ping().await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "document store liveness check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn settings_default_values() {
        let settings = GatewaySettings::new("mongodb://localhost:27017", "golangAPI");

        assert_eq!(settings.uri(), "mongodb://localhost:27017");
        assert_eq!(settings.database(), "golangAPI");
        assert_eq!(settings.connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
    }

    #[rstest]
    fn settings_builder_overrides_timeout() {
        let settings = GatewaySettings::new("mongodb://localhost:27017", "golangAPI")
            .with_connect_timeout(Duration::from_secs(2));

        assert_eq!(settings.connect_timeout(), Duration::from_secs(2));
    }

    #[rstest]
    #[tokio::test]
    async fn connect_rejects_malformed_uris() {
        let settings = GatewaySettings::new("postgres://localhost/nope", "golangAPI");

        let err = MongoGateway::connect(&settings)
            .await
            .expect_err("scheme is not mongodb");

        assert!(matches!(err, GatewayError::InvalidUri { .. }));
    }

    #[rstest]
    fn error_display_includes_context() {
        assert!(
            GatewayError::connect("refused")
                .to_string()
                .contains("refused")
        );
        assert!(
            GatewayError::Timeout {
                budget: Duration::from_secs(10)
            }
            .to_string()
            .contains("10s")
        );
    }
}
