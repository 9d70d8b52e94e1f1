/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (a `.env` file is read
 * by the binary before this runs), with defaults suitable for local
 * development:
 *
 * - `SERVER_PORT` - listen port (default 8181)
 * - `JWT_SECRET` - HS256 secret for session tokens
 * - `BANNED_USERNAMES` - comma-separated usernames that may not edit
 * - `LOGIN_URL` - where unauthenticated editors are sent (default `/login`)
 * - `SEED_COLLECTIONS` - optional path to a TOML seed file
 */

use std::path::PathBuf;
use thiserror::Error;

use crate::backend::rights::BannedUsernames;

const DEFAULT_PORT: u16 = 8181;
const DEFAULT_LOGIN_URL: &str = "/login";
const DEV_JWT_SECRET: &str = "collection-editor-dev-secret";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to read config: {0}")]
    Io(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub banned_usernames: BannedUsernames,
    pub login_url: String,
    pub seed_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            banned_usernames: BannedUsernames::default(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            seed_path: None,
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(port) = std::env::var("SERVER_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue(format!("SERVER_PORT={}", port)))?;
            builder = builder.port(port);
        }

        match std::env::var("JWT_SECRET") {
            Ok(secret) => builder = builder.jwt_secret(secret),
            Err(_) => tracing::warn!("JWT_SECRET not set, using the development secret"),
        }

        if let Ok(names) = std::env::var("BANNED_USERNAMES") {
            builder = builder.banned_usernames(parse_name_list(&names));
        }

        if let Ok(login_url) = std::env::var("LOGIN_URL") {
            builder = builder.login_url(login_url);
        }

        if let Ok(path) = std::env::var("SEED_COLLECTIONS") {
            builder = builder.seed_path(PathBuf::from(path));
        }

        builder.build()
    }
}

fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    jwt_secret: Option<String>,
    banned_usernames: Vec<String>,
    login_url: Option<String>,
    seed_path: Option<PathBuf>,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn banned_usernames<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banned_usernames = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = Some(url.into());
        self
    }

    pub fn seed_path(mut self, path: PathBuf) -> Self {
        self.seed_path = Some(path);
        self
    }

    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let defaults = ServerConfig::default();
        let jwt_secret = self.jwt_secret.unwrap_or(defaults.jwt_secret);
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        let login_url = self.login_url.unwrap_or(defaults.login_url);
        if login_url.is_empty() {
            return Err(ConfigError::MissingValue("LOGIN_URL"));
        }

        Ok(ServerConfig {
            port: self.port.unwrap_or(defaults.port),
            jwt_secret,
            banned_usernames: BannedUsernames::new(self.banned_usernames),
            login_url,
            seed_path: self.seed_path,
        })
    }
}
