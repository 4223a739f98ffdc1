//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PROFILES_*` environment variables, and an
//! optional config file, in the usual OrthoConfig precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_DATABASE, MongoConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";

/// Error raised when a configured value cannot be used.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid bind address {value}: {message}")]
    BindAddr { value: String, message: String },
}

/// Configuration for the profile server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROFILES")]
pub struct ServerSettings {
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// MongoDB connection string.
    pub mongodb_uri: Option<String>,
    /// Database holding the `profiles` collection.
    pub database: Option<String>,
    /// Upper bound on pooled MongoDB connections.
    pub max_pool_size: Option<u32>,
    /// Seconds to wait for a reachable MongoDB server.
    pub server_selection_timeout_secs: Option<u64>,
    /// Serve from process memory instead of MongoDB.
    #[ortho_config(default = false)]
    pub in_memory: bool,
}

impl ServerSettings {
    /// Return the listener address, falling back to `0.0.0.0:5000`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the configured value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the MongoDB connection string.
    pub fn mongodb_uri(&self) -> &str {
        self.mongodb_uri.as_deref().unwrap_or(DEFAULT_MONGODB_URI)
    }

    /// Return the database name.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Build the store configuration from these settings.
    pub fn mongo_config(&self) -> MongoConfig {
        let config = MongoConfig::new(self.mongodb_uri())
            .with_database(self.database())
            .with_max_pool_size(self.max_pool_size);
        match self.server_selection_timeout_secs {
            Some(secs) => config.with_server_selection_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "PROFILES_BIND_ADDR",
        "PROFILES_MONGODB_URI",
        "PROFILES_DATABASE",
        "PROFILES_MAX_POOL_SIZE",
        "PROFILES_SERVER_SELECTION_TIMEOUT_SECS",
        "PROFILES_IN_MEMORY",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("profile-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(!settings.in_memory);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 5000)))
        );
        assert_eq!(settings.mongodb_uri(), DEFAULT_MONGODB_URI);
        assert_eq!(settings.database(), DEFAULT_DATABASE);
        assert!(settings.max_pool_size.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PROFILES_BIND_ADDR", Some("127.0.0.1:8080".to_owned())),
            (
                "PROFILES_MONGODB_URI",
                Some("mongodb://db.internal:27017".to_owned()),
            ),
            ("PROFILES_DATABASE", Some("profiles_test".to_owned())),
            ("PROFILES_MAX_POOL_SIZE", Some("4".to_owned())),
            ("PROFILES_SERVER_SELECTION_TIMEOUT_SECS", None),
            ("PROFILES_IN_MEMORY", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.in_memory);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 8080)))
        );
        assert_eq!(settings.max_pool_size, Some(4));

        let mongo = settings.mongo_config();
        assert_eq!(mongo.uri(), "mongodb://db.internal:27017");
        assert_eq!(mongo.database(), "profiles_test");
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("localhost".to_owned()),
            ..ServerSettings::default()
        };

        let err = settings.bind_addr().expect_err("not a socket address");
        assert!(matches!(err, SettingsError::BindAddr { ref value, .. } if value == "localhost"));
    }
}
