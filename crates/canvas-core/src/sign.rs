//! Signed-request production.
//!
//! The host platform normally produces these tokens; this side exists for
//! local testing, fixtures and the `canvas sign` command.

use serde_json::Value;

use crate::encoding::b64encode;
use crate::error::SignError;
use crate::payload::ALGORITHM_HMAC_SHA256;
use crate::secret::AppSecret;
use crate::verify::compute_signature;

/// Sign a JSON object and return the `<signature>.<payload>` token.
///
/// A missing `algorithm` field is filled in with HMAC-SHA256; any other
/// algorithm claim is refused, since the verifier would reject it anyway.
pub fn sign_signed_request(payload: &Value, secret: &AppSecret) -> Result<String, SignError> {
    let mut object = match payload {
        Value::Object(map) => map.clone(),
        _ => return Err(SignError::NotAnObject),
    };

    match object.get("algorithm") {
        None => {
            object.insert(
                "algorithm".to_string(),
                Value::String(ALGORITHM_HMAC_SHA256.to_string()),
            );
        }
        Some(Value::String(alg)) if alg.eq_ignore_ascii_case(ALGORITHM_HMAC_SHA256) => {}
        Some(other) => {
            return Err(SignError::UnsupportedAlgorithm {
                algorithm: other.as_str().map_or_else(|| other.to_string(), str::to_string),
            })
        }
    }

    let bytes = serde_json::to_vec(&Value::Object(object))?;
    let encoded_payload = b64encode(bytes);
    let sig = sign_encoded_payload(&encoded_payload, secret);
    Ok(format!("{sig}.{encoded_payload}"))
}

/// Signature half for an already-encoded payload.
pub fn sign_encoded_payload(encoded_payload: &str, secret: &AppSecret) -> String {
    compute_signature(encoded_payload.as_bytes(), secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::b64decode;
    use serde_json::json;

    #[test]
    fn test_inserts_algorithm() {
        let token = sign_signed_request(&json!({"user_id": "1"}), &AppSecret::from("k")).unwrap();
        let (_, payload) = token.split_once('.').unwrap();
        let decoded: Value = serde_json::from_slice(&b64decode(payload).unwrap()).unwrap();
        assert_eq!(decoded["algorithm"], "HMAC-SHA256");
        assert_eq!(decoded["user_id"], "1");
    }

    #[test]
    fn test_token_shape() {
        let token =
            sign_signed_request(&json!({"algorithm": "HMAC-SHA256"}), &AppSecret::from("k"))
                .unwrap();
        assert_eq!(token.matches('.').count(), 1);
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn test_deterministic() {
        let payload = json!({"algorithm": "HMAC-SHA256", "user_id": "1"});
        let secret = AppSecret::from("k");
        assert_eq!(
            sign_signed_request(&payload, &secret).unwrap(),
            sign_signed_request(&payload, &secret).unwrap()
        );
    }

    #[test]
    fn test_rejects_non_object() {
        let err = sign_signed_request(&json!(["x"]), &AppSecret::from("k")).unwrap_err();
        assert!(matches!(err, SignError::NotAnObject));
    }

    #[test]
    fn test_refuses_other_algorithms() {
        let err = sign_signed_request(&json!({"algorithm": "HMAC-SHA1"}), &AppSecret::from("k"))
            .unwrap_err();
        match err {
            SignError::UnsupportedAlgorithm { algorithm } => assert_eq!(algorithm, "HMAC-SHA1"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
