//! Decision for a canvas page POST carrying a `signed_request` parameter.
//!
//! Every verification failure collapses into a single `Forbidden` outcome
//! here; the specific reason is only logged.

use tracing::{info, warn};
use url::Url;

use crate::config::CanvasConfig;
use crate::error::{ConfigResult, VerifyError};
use crate::login::oauth_login_url;
use crate::payload::SignedRequestPayload;
use crate::verify::verify_signed_request;

/// Name of the POST parameter the host platform sends.
pub const SIGNED_REQUEST_PARAM: &str = "signed_request";

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasDecision {
    /// Request verified and the user has authorized the app.
    Authorized {
        user_id: String,
        payload: SignedRequestPayload,
    },
    /// Request verified but carries no user; send the user through OAuth.
    LoginRequired { login_url: Url },
    /// Request missing or rejected.
    Forbidden { reason: VerifyError },
}

impl CanvasDecision {
    /// Decide how to answer a canvas POST.
    ///
    /// Fails only when the configuration cannot produce a login URL.
    pub fn from_signed_request(
        signed_request: Option<&str>,
        config: &CanvasConfig,
    ) -> ConfigResult<Self> {
        let Some(token) = signed_request else {
            warn!(kind = "malformed_token", "canvas request without {SIGNED_REQUEST_PARAM}");
            return Ok(Self::Forbidden {
                reason: VerifyError::malformed_token(format!(
                    "missing {SIGNED_REQUEST_PARAM} parameter"
                )),
            });
        };

        let payload = match verify_signed_request(token, &config.secret) {
            Ok(payload) => payload,
            Err(reason) => return Ok(Self::Forbidden { reason }),
        };

        match payload.user_id() {
            Some(user_id) => {
                info!(user_id = %user_id, "canvas request authorized");
                Ok(Self::Authorized { user_id, payload })
            }
            None => Ok(Self::LoginRequired {
                login_url: oauth_login_url(config)?,
            }),
        }
    }

    /// HTTP status for the response.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Authorized { .. } | Self::LoginRequired { .. } => 200,
            Self::Forbidden { .. } => 403,
        }
    }

    /// Response body.
    ///
    /// The login redirect has to break out of the canvas iframe, so it is a
    /// script setting `top.location` rather than an HTTP redirect.
    pub fn body(&self) -> String {
        match self {
            Self::Authorized { user_id, .. } => user_id.clone(),
            Self::LoginRequired { login_url } => format!(
                "<script> top.location.href='{}'</script>",
                escape_js_single_quoted(login_url.as_str())
            ),
            Self::Forbidden { .. } => "forbidden".to_string(),
        }
    }
}

fn escape_js_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '<' => out.push_str("\\x3c"),
            '>' => out.push_str("\\x3e"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
