//! Signed-request verification.
//!
//! Wire form: `<signature>.<payload>`, both halves unpadded URL-safe base64.
//! The signature is HMAC-SHA256 over the *encoded* payload string, keyed with
//! the application secret.
//!
//! # Verification Steps
//!
//! 1. Split on the first `.`; both halves must be non-empty
//! 2. Decode the payload half and parse it as a JSON object
//! 3. Require `algorithm` to be HMAC-SHA256 (case-insensitive)
//! 4. Recompute the signature and compare in constant time

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::encoding::{b64decode, b64encode};
use crate::error::{VerifyError, VerifyResult};
use crate::payload::{SignedRequestPayload, ALGORITHM_HMAC_SHA256};
use crate::secret::AppSecret;

type HmacSha256 = Hmac<Sha256>;

/// Verifier bound to one application secret.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct SignedRequestVerifier {
    secret: AppSecret,
}

impl SignedRequestVerifier {
    pub fn new(secret: AppSecret) -> Self {
        Self { secret }
    }

    /// Verify a token against this verifier's secret.
    pub fn verify(&self, token: &str) -> VerifyResult<SignedRequestPayload> {
        verify_signed_request(token, &self.secret)
    }
}

/// Verify a signed request and return its payload.
///
/// No payload is ever returned unless the signature matched. Every error
/// variant means "deny"; see [`VerifyError`].
pub fn verify_signed_request(
    token: &str,
    secret: &AppSecret,
) -> VerifyResult<SignedRequestPayload> {
    let result = verify_inner(token, secret);
    match &result {
        Ok(payload) => {
            let user_id = payload.user_id();
            debug!(
                user_id = user_id.as_deref().unwrap_or("-"),
                "signed request accepted"
            );
        }
        Err(e) => warn!(kind = e.kind(), "signed request rejected"),
    }
    result
}

fn verify_inner(token: &str, secret: &AppSecret) -> VerifyResult<SignedRequestPayload> {
    // 1. Split
    let (encoded_sig, encoded_payload) = token
        .split_once('.')
        .ok_or_else(|| VerifyError::malformed_token("missing '.' separator"))?;
    if encoded_sig.is_empty() {
        return Err(VerifyError::malformed_token("empty signature"));
    }
    if encoded_payload.is_empty() {
        return Err(VerifyError::malformed_token("empty payload"));
    }

    // 2. Decode + parse
    let payload_bytes = b64decode(encoded_payload)
        .map_err(|e| VerifyError::malformed_token(format!("invalid base64 payload: {e}")))?;
    let payload = parse_payload(&payload_bytes)?;

    // 3. Algorithm allow-list
    check_algorithm(&payload)?;

    // 4. Signature over the encoded payload, as received
    let expected_sig = compute_signature(encoded_payload.as_bytes(), secret);
    if !bool::from(expected_sig.as_bytes().ct_eq(encoded_sig.as_bytes())) {
        return Err(VerifyError::InvalidSignature);
    }

    Ok(payload)
}

fn parse_payload(bytes: &[u8]) -> VerifyResult<SignedRequestPayload> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(object)) => Ok(SignedRequestPayload::from_object(object)),
        Ok(_) => Err(VerifyError::malformed_payload("payload is not a JSON object")),
        Err(e) => Err(VerifyError::malformed_payload(format!("invalid JSON: {e}"))),
    }
}

fn check_algorithm(payload: &SignedRequestPayload) -> VerifyResult<()> {
    match payload.get("algorithm") {
        Some(Value::String(alg)) if alg.eq_ignore_ascii_case(ALGORITHM_HMAC_SHA256) => Ok(()),
        Some(Value::String(alg)) => Err(VerifyError::UnsupportedAlgorithm {
            algorithm: Some(alg.clone()),
        }),
        Some(other) => Err(VerifyError::UnsupportedAlgorithm {
            algorithm: Some(other.to_string()),
        }),
        None => Err(VerifyError::UnsupportedAlgorithm { algorithm: None }),
    }
}

/// Encoded HMAC-SHA256 of `message` under `secret`.
pub(crate) fn compute_signature(message: &[u8], secret: &AppSecret) -> String {
    b64encode(hmac_sha256(secret.expose(), message))
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}
