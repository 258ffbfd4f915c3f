//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub federation: FederationConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Port number (e.g., 9090)
    pub port: u16,
    /// Public domain (e.g., "social.example.com")
    pub domain: String,
    /// Protocol ("http" or "https")
    pub protocol: String,
}

impl ServerConfig {
    /// Get the base URL for the instance
    ///
    /// # Returns
    /// Full URL like "https://social.example.com"
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.protocol, self.domain)
    }
}

/// The single local identity
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Actor username (default: "testUser")
    #[serde(default = "default_username")]
    pub username: String,
    /// Content of the single Note published at startup.
    ///
    /// Falls back to a short templated message if not set.
    pub status_content: Option<String>,
}

impl IdentityConfig {
    pub fn status_content(&self) -> String {
        self.status_content.clone().unwrap_or_else(|| {
            format!(
                "This will be the content of my new post from {}.",
                self.username
            )
        })
    }
}

fn default_username() -> String {
    "testUser".to_string()
}

fn default_deliver_on_startup() -> bool {
    true
}

/// Federation configuration
///
/// The well-known remote recipient is configuration, not a literal baked
/// into document serialization.
#[derive(Debug, Clone, Deserialize)]
pub struct FederationConfig {
    /// The one remote actor mentioned and delivered to
    pub target: FederationTarget,
    /// Fire the startup delivery to the target inbox.
    #[serde(default = "default_deliver_on_startup")]
    pub deliver_on_startup: bool,
}

/// A well-known federation target
#[derive(Debug, Clone, Deserialize)]
pub struct FederationTarget {
    /// Remote actor URI (used as `cc` and Mention href)
    pub actor_uri: String,
    /// Remote inbox URI the startup delivery POSTs to
    pub inbox_uri: String,
    /// Mention handle (e.g., "@faleidel@mastodon.social")
    pub address: String,
}

impl FederationTarget {
    /// Host component of the inbox URI, for the outbound `Host` header.
    pub fn inbox_host(&self) -> Result<String, crate::error::AppError> {
        let parsed = url::Url::parse(&self.inbox_uri).map_err(|e| {
            crate::error::AppError::Config(format!("Invalid federation.target.inbox_uri: {}", e))
        })?;
        parsed
            .host_str()
            .map(|host| host.to_string())
            .ok_or_else(|| {
                crate::error::AppError::Config(
                    "federation.target.inbox_uri has no host".to_string(),
                )
            })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (IRONTREE_*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 9090)?
            .set_default("server.domain", "localhost")?
            .set_default("server.protocol", "http")?
            .set_default("identity.username", "testUser")?
            .set_default(
                "federation.target.actor_uri",
                "https://mastodon.social/users/faleidel",
            )?
            .set_default("federation.target.inbox_uri", "https://mastodon.social/inbox")?
            .set_default("federation.target.address", "@faleidel@mastodon.social")?
            .set_default("federation.deliver_on_startup", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (IRONTREE_*)
            .add_source(
                Environment::with_prefix("IRONTREE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        if self.identity.username.trim().is_empty() {
            return Err(crate::error::AppError::Config(
                "identity.username must not be empty".to_string(),
            ));
        }

        if self.identity.username.contains('/') || self.identity.username.contains('@') {
            return Err(crate::error::AppError::Config(
                "identity.username must not contain '/' or '@'".to_string(),
            ));
        }

        // Fails early if the inbox URI cannot yield a Host header.
        self.federation.target.inbox_host()?;

        Ok(())
    }
}
