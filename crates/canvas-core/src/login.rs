//! OAuth login dialog URL for users who have not authorized the app yet.

use url::Url;

use crate::config::CanvasConfig;
use crate::error::{ConfigError, ConfigResult};

pub const OAUTH_DIALOG_URL: &str = "https://www.facebook.com/dialog/oauth";
pub const CANVAS_BASE_URL: &str = "https://apps.facebook.com/";

/// Canvas page the login dialog redirects back to:
/// `https://apps.facebook.com/<namespace>/`.
pub fn canvas_page_url(namespace: &str) -> ConfigResult<Url> {
    validate_namespace(namespace)?;
    Ok(Url::parse(CANVAS_BASE_URL)?.join(&format!("{namespace}/"))?)
}

/// Build the OAuth dialog URL.
///
/// `scope` is only appended when at least one permission is configured.
pub fn oauth_login_url(config: &CanvasConfig) -> ConfigResult<Url> {
    let redirect = canvas_page_url(&config.namespace)?;

    let mut params = vec![
        ("client_id", config.app_id.clone()),
        ("redirect_uri", redirect.to_string()),
    ];
    if !config.scope.is_empty() {
        params.push(("scope", config.scope.join(",")));
    }

    Ok(Url::parse_with_params(OAUTH_DIALOG_URL, &params)?)
}

fn validate_namespace(namespace: &str) -> ConfigResult<()> {
    let invalid = |reason: &str| ConfigError::InvalidNamespace {
        namespace: namespace.to_string(),
        reason: reason.to_string(),
    };

    if namespace.is_empty() {
        return Err(invalid("empty"));
    }
    if !namespace
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(invalid("only ASCII letters, digits, '-' and '_' are allowed"));
    }
    Ok(())
}
