#![no_main]

use canvas_core::{sign_encoded_payload, verify_signed_request, AppSecret};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(token) = std::str::from_utf8(data) else {
        return;
    };
    let secret = AppSecret::from("fuzz-secret");

    // Arbitrary input must never verify or panic
    assert!(verify_signed_request(token, &secret).is_err());

    // Re-signing the payload half must either verify or fail before the signature check
    if let Some((_, encoded_payload)) = token.split_once('.') {
        if encoded_payload.is_empty() {
            return;
        }
        let resigned = format!(
            "{}.{}",
            sign_encoded_payload(encoded_payload, &secret),
            encoded_payload
        );
        if let Err(e) = verify_signed_request(&resigned, &secret) {
            assert_ne!(e, canvas_core::VerifyError::InvalidSignature);
        }
    }
});
