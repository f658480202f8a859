//! Canvas app configuration.
//!
//! Values come from a YAML file, the environment, or both (environment wins).
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `FACEBOOK_APP_ID` | OAuth client id |
//! | `FACEBOOK_SECRET` | App secret, used as the signed-request HMAC key |
//! | `FACEBOOK_NAMESPACE` | Canvas namespace (`apps.facebook.com/<namespace>/`) |
//! | `FACEBOOK_SCOPE` | Optional comma-separated permission list |

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::secret::AppSecret;

pub const ENV_APP_ID: &str = "FACEBOOK_APP_ID";
pub const ENV_SECRET: &str = "FACEBOOK_SECRET";
pub const ENV_NAMESPACE: &str = "FACEBOOK_NAMESPACE";
pub const ENV_SCOPE: &str = "FACEBOOK_SCOPE";

/// Resolved canvas app configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasConfig {
    pub app_id: String,
    pub secret: AppSecret,
    pub namespace: String,
    /// Permissions requested in the login dialog; empty means none.
    pub scope: Vec<String>,
}

impl CanvasConfig {
    /// Load from environment variables only.
    pub fn from_env() -> ConfigResult<Self> {
        PartialConfig::default().merge_env(env_var).resolve()
    }

    /// Load from a YAML file only.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        PartialConfig::load(path.as_ref())?.resolve()
    }

    /// Load from an optional YAML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let file = match path {
            Some(path) => PartialConfig::load(path)?,
            None => PartialConfig::default(),
        };
        file.merge_env(env_var).resolve()
    }

    pub fn with_scope<I, S>(mut self, scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = scope.into_iter().map(Into::into).collect();
        self
    }
}

/// Config as written on disk; every field optional until resolved.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub app_id: Option<String>,
    pub secret: Option<AppSecret>,
    pub namespace: Option<String>,
    pub scope: Option<Vec<String>>,
}

impl PartialConfig {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: Self = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded canvas config file");
        Ok(parsed)
    }

    /// Overlay values from `lookup`; unset or empty variables keep the
    /// current value.
    pub fn merge_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = lookup(ENV_APP_ID) {
            self.app_id = Some(v);
        }
        if let Some(v) = lookup(ENV_SECRET) {
            self.secret = Some(AppSecret::from(v));
        }
        if let Some(v) = lookup(ENV_NAMESPACE) {
            self.namespace = Some(v);
        }
        if let Some(v) = lookup(ENV_SCOPE) {
            self.scope = Some(parse_scope(&v));
        }
        self
    }

    pub fn resolve(self) -> ConfigResult<CanvasConfig> {
        let secret = self
            .secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing { var: ENV_SECRET })?;

        Ok(CanvasConfig {
            app_id: required(self.app_id, ENV_APP_ID)?,
            secret,
            namespace: required(self.namespace, ENV_NAMESPACE)?,
            scope: self.scope.unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>, var: &'static str) -> ConfigResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { var })
}

fn parse_scope(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
