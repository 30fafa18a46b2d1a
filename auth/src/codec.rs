use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::GeneralPurpose;
use base64::engine::GeneralPurposeConfig;
use base64::Engine;
use thiserror::Error;

/// URL-safe alphabet, no padding on output, padding optional on input.
const URL_SAFE_UNPADDED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Error type for codec operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Invalid base64url encoding: {0}")]
    InvalidEncoding(String),
}

/// Encode bytes as URL-safe base64 with trailing `=` padding stripped.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_UNPADDED.encode(bytes)
}

/// Decode URL-safe base64, with or without trailing padding.
///
/// # Errors
/// * `InvalidEncoding` - Input contains characters outside the URL-safe
///   alphabet or has a length that no encoder can produce (`1 mod 4`)
pub fn decode(encoded: &str) -> Result<Vec<u8>, CodecError> {
    URL_SAFE_UNPADDED
        .decode(encoded)
        .map_err(|e| CodecError::InvalidEncoding(e.to_string()))
}
