//! Signed-request verification for canvas apps.
//!
//! A host platform embeds the app in an iframe and POSTs a `signed_request`
//! parameter: an HMAC-SHA256-signed, base64url-encoded JSON payload. This
//! crate provides:
//!
//! - Verification of signed requests against the app secret
//! - Token production for fixtures and local testing
//! - App configuration from environment and/or YAML
//! - The OAuth login dialog URL and the canvas page decision
//!
//! # Quick Start
//!
//! ```
//! use canvas_core::{sign_signed_request, verify_signed_request, AppSecret};
//! use serde_json::json;
//!
//! let secret = AppSecret::from("s3cr3t");
//! let token = sign_signed_request(&json!({"user_id": "123"}), &secret).unwrap();
//!
//! let payload = verify_signed_request(&token, &secret).unwrap();
//! assert_eq!(payload.user_id().as_deref(), Some("123"));
//!
//! assert!(verify_signed_request(&token, &AppSecret::from("wrong")).is_err());
//! ```

pub mod canvas;
pub mod config;
pub mod encoding;
pub mod error;
pub mod login;
pub mod payload;
pub mod secret;
pub mod sign;
pub mod verify;

pub use canvas::{CanvasDecision, SIGNED_REQUEST_PARAM};
pub use config::{CanvasConfig, PartialConfig};
pub use error::{ConfigError, ConfigResult, SignError, VerifyError, VerifyResult};
pub use login::{canvas_page_url, oauth_login_url};
pub use payload::{SignedRequestPayload, ALGORITHM_HMAC_SHA256};
pub use secret::AppSecret;
pub use sign::{sign_encoded_payload, sign_signed_request};
pub use verify::{verify_signed_request, SignedRequestVerifier};
