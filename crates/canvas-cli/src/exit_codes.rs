//! Exit codes for the `canvas` CLI.
//! Rejected signed requests exit with `VerifyError::exit_code()`: 1 malformed,
//! 3 unsupported algorithm, 4 invalid signature.

pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 2; // Missing secret, bad config file, unreadable input

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_core::VerifyError;

    #[test]
    fn test_rejection_codes_do_not_collide() {
        let rejections = [
            VerifyError::MalformedToken {
                reason: String::new(),
            },
            VerifyError::MalformedPayload {
                reason: String::new(),
            },
            VerifyError::UnsupportedAlgorithm { algorithm: None },
            VerifyError::InvalidSignature,
        ];
        for err in rejections {
            assert_ne!(err.exit_code(), SUCCESS);
            assert_ne!(err.exit_code(), CONFIG_ERROR);
        }
    }
}
