//! Configuration for a bootstrap run
//!
//! Settings are read once from a `.env` style file. Only `ADMIN_PASSWORD`
//! is required; every other key falls back to a default.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub mod env_file;
mod error;

pub use error::ConfigError;

pub const DEFAULT_HOMESERVER: &str = "https://matrix.example.com";
pub const DEFAULT_ADMIN_USER: &str = "admin";
pub const DEFAULT_SERVER_NAME: &str = "example.com";

/// Default location of the env file, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = "compose/.env";

const KEY_HOMESERVER: &str = "PUBLIC_BASEURL";
const KEY_ADMIN_USER: &str = "ADMIN_USER";
const KEY_ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";
const KEY_SERVER_NAME: &str = "SYNAPSE_SERVER_NAME";

/// Settings needed to log in and seed the community
pub struct BootstrapConfig {
    /// Homeserver base URL used for every API call
    pub homeserver: String,

    /// Localpart of the administrative account
    pub admin_user: String,

    /// Login secret for the administrative account
    pub admin_password: SecretString,

    /// Server name used as the domain of user ids and in `via` lists
    pub server_name: String,
}

impl fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("homeserver", &self.homeserver)
            .field("admin_user", &self.admin_user)
            .field("admin_password", &"[REDACTED]")
            .field("server_name", &self.server_name)
            .finish()
    }
}

impl BootstrapConfig {
    /// Load configuration from an env file
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileReadError(format!("{}: {}", path.display(), e)))?;

        let vars = env_file::parse(&contents);
        Self::from_map(&vars).map_err(|e| match e {
            ConfigError::MissingPassword(_) => {
                ConfigError::MissingPassword(path.display().to_string())
            }
            other => other,
        })
    }

    /// Build configuration from already parsed key/value pairs
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| {
            vars.get(key).cloned().unwrap_or_else(|| default.to_string())
        };

        let config = Self {
            homeserver: get(KEY_HOMESERVER, DEFAULT_HOMESERVER),
            admin_user: get(KEY_ADMIN_USER, DEFAULT_ADMIN_USER),
            admin_password: SecretString::new(get(KEY_ADMIN_PASSWORD, "")),
            server_name: get(KEY_SERVER_NAME, DEFAULT_SERVER_NAME),
        };

        config.validate()?;
        Ok(config)
    }

    /// Fully qualified id of the administrative account, `@user:server`
    pub fn user_id(&self) -> String {
        format!("@{}:{}", self.admin_user, self.server_name)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_placeholder(self.admin_password.expose_secret()) {
            return Err(ConfigError::MissingPassword(".env".to_string()));
        }

        if !(self.homeserver.starts_with("http://") || self.homeserver.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(format!(
                "{} must be an http(s) URL, got '{}'",
                KEY_HOMESERVER, self.homeserver
            )));
        }

        if self.admin_user.is_empty() {
            return Err(ConfigError::ValidationFailed(format!("{} is empty", KEY_ADMIN_USER)));
        }

        if self.server_name.is_empty() {
            return Err(ConfigError::ValidationFailed(format!("{} is empty", KEY_SERVER_NAME)));
        }

        Ok(())
    }
}

/// Unset passwords and template values such as `__CHANGE_ME__`
fn is_placeholder(password: &str) -> bool {
    password.is_empty() || password.starts_with("__")
}
