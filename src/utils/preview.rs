use base64::prelude::*;

/// Encodes image bytes as a base64 preview string for the comparison view.
pub fn encode_preview(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}
