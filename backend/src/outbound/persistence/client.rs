//! Pooled MongoDB client construction.
//!
//! The driver multiplexes operations over its own connection pool, so a
//! single [`MongoStore`] is built at startup, cloned into every adapter, and
//! shut down once the HTTP server stops.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

/// Errors raised while building or probing the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string or options were rejected.
    #[error("invalid MongoDB configuration: {message}")]
    Config { message: String },

    /// The deployment did not answer.
    #[error("MongoDB is unreachable: {message}")]
    Unreachable { message: String },
}

impl StoreError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}

/// Configuration for the MongoDB client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use backend::outbound::persistence::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://db:27017")
///     .with_database("profiles_test")
///     .with_max_pool_size(Some(20))
///     .with_server_selection_timeout(Duration::from_secs(2));
/// assert_eq!(config.database(), "profiles_test");
/// ```
#[derive(Debug, Clone)]
pub struct MongoConfig {
    uri: String,
    database: String,
    max_pool_size: Option<u32>,
    server_selection_timeout: Duration,
}

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "dating_app";

impl MongoConfig {
    /// Create a configuration with the given connection string.
    ///
    /// Defaults: database `dating_app`, driver-chosen pool size, and a five
    /// second server selection timeout.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_owned(),
            max_pool_size: None,
            server_selection_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Cap the number of pooled connections; `None` keeps the driver default.
    pub fn with_max_pool_size(mut self, max_pool_size: Option<u32>) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// How long an operation waits for a usable server before failing.
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Shared handle to a MongoDB database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Build the client. No network round trip happens until first use.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] when the connection string cannot be
    /// parsed.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(|err| StoreError::config(err.to_string()))?;
        options.max_pool_size = config.max_pool_size;
        options.server_selection_timeout = Some(config.server_selection_timeout);
        options.app_name = Some(env!("CARGO_PKG_NAME").to_owned());

        let client =
            Client::with_options(options).map_err(|err| StoreError::config(err.to_string()))?;
        let database = client.database(config.database());
        Ok(Self { client, database })
    }

    /// Round-trip a `ping` to check the deployment is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| StoreError::unreachable(err.to_string()))
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Close pooled connections and wait for in-flight operations.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}
