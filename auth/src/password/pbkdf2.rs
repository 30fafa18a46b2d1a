use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use super::errors::PasswordError;
use crate::codec;

const SALT_LENGTH: usize = 16;
const KEY_LENGTH: usize = 32;
const DELIMITER: char = '$';

/// Password hashing implementation.
///
/// Credentials are stored as `base64url(salt) + "$" + base64url(derived_key)`,
/// where the key is derived with PBKDF2-HMAC-SHA256. The iteration count is
/// not part of the stored string, so every hasher that verifies a credential
/// must be configured with the count that produced it.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    pub const DEFAULT_ITERATIONS: u32 = 120_000;

    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with `DEFAULT_ITERATIONS`
    pub fn new() -> Self {
        Self::with_iterations(Self::DEFAULT_ITERATIONS)
    }

    /// Create a hasher with a custom PBKDF2 iteration count.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Credential string in `salt$key` form
    ///
    /// # Errors
    /// * `HashingFailed` - The system random source is unavailable
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        let key = self.derive_key(password, &salt);

        Ok(format!(
            "{}{}{}",
            codec::encode(salt),
            DELIMITER,
            codec::encode(key)
        ))
    }

    /// Verify a password against a stored credential.
    ///
    /// Any malformed credential (missing or repeated delimiter, invalid
    /// encoding) is a mismatch, never an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `credential` - Stored credential in `salt$key` form
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, credential: &str) -> bool {
        let Some((salt_b64, key_b64)) = credential.split_once(DELIMITER) else {
            return false;
        };
        if key_b64.contains(DELIMITER) {
            return false;
        }

        let (Ok(salt), Ok(expected)) = (codec::decode(salt_b64), codec::decode(key_b64)) else {
            return false;
        };

        let actual = self.derive_key(password, &salt);
        constant_time_eq(&actual, &expected)
    }

    fn derive_key(&self, password: &str, salt: &[u8]) -> [u8; KEY_LENGTH] {
        let mut key = [0u8; KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, self.iterations, &mut key);
        key
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte comparison whose running time does not depend on where the inputs differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
