//! Error types for signed-request handling and canvas configuration.

use std::path::PathBuf;

/// Signed-request rejections.
///
/// Callers must treat every variant as "deny access". The variants exist for
/// diagnostics and exit codes, not for deciding whether to trust the payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// Token could not be split or its payload half is not valid base64.
    #[error("malformed signed request: {reason}")]
    MalformedToken { reason: String },

    /// Payload decoded but is not a JSON object.
    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },

    /// Payload claims an algorithm other than HMAC-SHA256 (or none at all).
    #[error("unsupported algorithm: {}", .algorithm.as_deref().unwrap_or("<missing>"))]
    UnsupportedAlgorithm { algorithm: Option<String> },

    /// Signature does not match the payload under the configured secret.
    #[error("signature verification failed")]
    InvalidSignature,
}

impl VerifyError {
    pub(crate) fn malformed_token(reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_payload(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    /// Stable tag used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedToken { .. } => "malformed_token",
            Self::MalformedPayload { .. } => "malformed_payload",
            Self::UnsupportedAlgorithm { .. } => "unsupported_algorithm",
            Self::InvalidSignature => "invalid_signature",
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedToken { .. } | Self::MalformedPayload { .. } => 1,
            Self::UnsupportedAlgorithm { .. } => 3,
            Self::InvalidSignature => 4,
        }
    }
}

/// Errors producing a signed request.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("refusing to sign with algorithm {algorithm}; only HMAC-SHA256 is supported")]
    UnsupportedAlgorithm { algorithm: String },

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required setting missing or empty.
    #[error("missing configuration value: {var}")]
    Missing { var: &'static str },

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Namespace cannot form a canvas URL.
    #[error("invalid canvas namespace {namespace:?}: {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type for signed-request verification.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
