use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

use super::claims::Claims;
use super::claims::Header;
use super::errors::TokenError;
use crate::codec;

type HmacSha256 = Hmac<Sha256>;

/// Issue a signed token for `subject`.
///
/// The token is `base64url(header) + "." + base64url(payload) + "." +
/// base64url(signature)`, where the signature is HMAC-SHA256 under `secret`
/// over the first two segments joined by `.`.
///
/// # Arguments
/// * `subject` - Identifier stored in the `sub` claim
/// * `now` - Issue time (Unix timestamp)
/// * `ttl_seconds` - Lifetime of the token
/// * `secret` - Shared signing key
///
/// # Errors
/// * `Encoding` - Header or payload could not be serialized
pub fn issue(
    subject: i64,
    now: i64,
    ttl_seconds: i64,
    secret: &[u8],
) -> Result<String, TokenError> {
    sign(&Claims::new(subject, now, ttl_seconds), secret)
}

/// Sign arbitrary claims with the default header.
pub fn sign(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    let header = serde_json::to_vec(&Header::default())
        .map_err(|e| TokenError::Encoding(e.to_string()))?;
    let payload = serde_json::to_vec(claims).map_err(|e| TokenError::Encoding(e.to_string()))?;

    let signing_input = format!("{}.{}", codec::encode(header), codec::encode(payload));
    let signature = signature_mac(secret, &signing_input)
        .map_err(|_| TokenError::Encoding("Invalid signing key".to_string()))?
        .finalize()
        .into_bytes();

    Ok(format!("{}.{}", signing_input, codec::encode(signature)))
}

/// Validate a token and return its claims.
///
/// The signature is checked before the payload is interpreted.
///
/// # Arguments
/// * `token` - Token string to decode
/// * `now` - Current time (Unix timestamp)
/// * `secret` - Shared signing key
///
/// # Errors
/// * `Malformed` - Token does not have exactly three `.`-separated segments
/// * `InvalidSignature` - Signature segment does not match
/// * `InvalidPayload` - Payload is not a valid claims document
/// * `Expired` - `now` is at or past the `exp` claim
pub fn decode(token: &str, now: i64, secret: &[u8]) -> Result<Claims, TokenError> {
    let mut segments = token.split('.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let signature = codec::decode(signature_b64).map_err(|_| TokenError::InvalidSignature)?;
    signature_mac(secret, &format!("{}.{}", header_b64, payload_b64))
        .map_err(|_| TokenError::InvalidSignature)?
        .verify_slice(&signature)
        .map_err(|_| TokenError::InvalidSignature)?;

    let payload =
        codec::decode(payload_b64).map_err(|e| TokenError::InvalidPayload(e.to_string()))?;
    let claims: Claims = serde_json::from_slice(&payload)
        .map_err(|e| TokenError::InvalidPayload(e.to_string()))?;

    if claims.is_expired(now) {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

fn signature_mac(
    secret: &[u8],
    signing_input: &str,
) -> Result<HmacSha256, hmac::digest::InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(secret)?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}
