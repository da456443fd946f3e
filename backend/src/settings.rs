//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_API_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::GatewaySettings;

const DEFAULT_DATABASE: &str = "golangAPI";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:6455";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No connection string was supplied.
    #[error("USER_API_MONGO_URI must be set")]
    MissingMongoUri,
    /// The bind address could not be parsed.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Runtime settings for the user service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_API")]
pub struct ServiceSettings {
    /// MongoDB connection string. Required.
    pub mongo_uri: Option<String>,
    /// Database holding the `users` collection.
    #[ortho_config(default = DEFAULT_DATABASE.to_owned())]
    pub database: String,
    /// Socket address the HTTP listener binds to.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// Budget in seconds for connecting and pinging the store.
    #[ortho_config(default = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: u64,
    /// Budget in seconds for each individual store call.
    #[ortho_config(default = DEFAULT_OPERATION_TIMEOUT_SECS)]
    pub operation_timeout_secs: u64,
}

impl ServiceSettings {
    /// Return the configured connection string.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingMongoUri`] when unset or blank.
    pub fn mongo_uri(&self) -> Result<&str, SettingsError> {
        self.mongo_uri
            .as_deref()
            .filter(|uri| !uri.trim().is_empty())
            .ok_or(SettingsError::MissingMongoUri)
    }

    /// Return the configured database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Return the parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] for unparsable values.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_str();
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Return the connect budget.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Return the per-call budget.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }

    /// Build gateway settings from the loaded values.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingMongoUri`] when no URI is configured.
    pub fn gateway_settings(&self) -> Result<GatewaySettings, SettingsError> {
        Ok(GatewaySettings::new(self.mongo_uri()?, self.database())
            .with_connect_timeout(self.connect_timeout()))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for service configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "USER_API_MONGO_URI",
        "USER_API_DATABASE",
        "USER_API_BIND_ADDR",
        "USER_API_CONNECT_TIMEOUT_SECS",
        "USER_API_OPERATION_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> ServiceSettings {
        ServiceSettings::load_from_iter([OsString::from("user-service")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.mongo_uri(), Err(SettingsError::MissingMongoUri));
        assert_eq!(settings.database(), DEFAULT_DATABASE);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 6455)))
        );
        assert_eq!(settings.connect_timeout(), Duration::from_secs(10));
        assert_eq!(settings.operation_timeout(), Duration::from_secs(10));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USER_API_MONGO_URI", Some("mongodb://db:27017".to_owned())),
            ("USER_API_DATABASE", Some("people".to_owned())),
            ("USER_API_BIND_ADDR", Some("0.0.0.0:8080".to_owned())),
            ("USER_API_CONNECT_TIMEOUT_SECS", Some("3".to_owned())),
            ("USER_API_OPERATION_TIMEOUT_SECS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let gateway = settings.gateway_settings().expect("uri is set");
        assert_eq!(gateway.uri(), "mongodb://db:27017");
        assert_eq!(gateway.database(), "people");
        assert_eq!(gateway.connect_timeout(), Duration::from_secs(3));
        assert_eq!(settings.operation_timeout(), Duration::from_secs(4));
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
    }

    fn settings_with(mongo_uri: Option<&str>, bind_addr: &str) -> ServiceSettings {
        ServiceSettings {
            mongo_uri: mongo_uri.map(str::to_owned),
            database: DEFAULT_DATABASE.to_owned(),
            bind_addr: bind_addr.to_owned(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            operation_timeout_secs: DEFAULT_OPERATION_TIMEOUT_SECS,
        }
    }

    #[rstest]
    fn only_the_uri_is_required() {
        let _guard = lock_env([
            ("USER_API_MONGO_URI", Some("mongodb://db:27017".to_owned())),
            ("USER_API_DATABASE", None),
            ("USER_API_BIND_ADDR", None),
            ("USER_API_CONNECT_TIMEOUT_SECS", None),
            ("USER_API_OPERATION_TIMEOUT_SECS", None),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.mongo_uri(), Ok("mongodb://db:27017"));
        assert_eq!(settings.database(), DEFAULT_DATABASE);
    }

    #[rstest]
    #[case("   ")]
    #[case("")]
    fn blank_uris_are_missing(#[case] uri: &str) {
        let settings = settings_with(Some(uri), DEFAULT_BIND_ADDR);
        assert_eq!(
            settings.gateway_settings().map(|_| ()),
            Err(SettingsError::MissingMongoUri)
        );
    }

    #[rstest]
    fn malformed_bind_addresses_are_reported() {
        let settings = settings_with(None, "localhost");
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }
}
