//! URL-safe base64 as used on the signed-request wire.
//!
//! Encoders strip the trailing `=`; the decoder accepts segments with or
//! without padding. Segments whose length can never be valid base64
//! (`len % 4 == 1`), characters outside the URL-safe alphabet and
//! non-canonical trailing bits are rejected rather than repaired.

use base64::alphabet::URL_SAFE;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

pub use base64::DecodeError;

const SIGNED_REQUEST_B64: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as unpadded URL-safe base64.
pub fn b64encode(data: impl AsRef<[u8]>) -> String {
    SIGNED_REQUEST_B64.encode(data)
}

/// Decode URL-safe base64, restoring padding as needed.
pub fn b64decode(segment: &str) -> Result<Vec<u8>, DecodeError> {
    SIGNED_REQUEST_B64.decode(segment)
}
