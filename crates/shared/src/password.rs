//! Password and PIN hashing utilities using bcrypt.
//!
//! Both user passwords and PINs are stored as bcrypt hashes with the same
//! cost factor. The stored hash embeds its salt and cost, so verification
//! needs no extra parameters.

use thiserror::Error;

/// Error type for credential hashing operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash credential: {0}")]
    HashError(String),

    #[error("Failed to verify credential: {0}")]
    VerifyError(String),
}

/// bcrypt cost factor for all stored credential hashes.
pub const BCRYPT_COST: u32 = 12;

/// Hashes a password or PIN using bcrypt with [`BCRYPT_COST`].
///
/// Returns a `$2b$`-prefixed hash string containing the cost and a fresh
/// random salt.
///
/// # Example
/// ```
/// use shared::password::hash_credential;
///
/// let hash = hash_credential("my_secure_password").unwrap();
/// assert!(hash.starts_with("$2b$12$"));
/// ```
pub fn hash_credential(secret: &str) -> Result<String, PasswordError> {
    bcrypt::hash(secret, BCRYPT_COST).map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password or PIN against a stored bcrypt hash.
///
/// # Returns
/// * `Ok(true)` - Credential matches
/// * `Ok(false)` - Credential does not match
/// * `Err(PasswordError)` - The stored hash is malformed
pub fn verify_credential(secret: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(secret, hash).map_err(|e| PasswordError::VerifyError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_credential_embeds_cost() {
        let hash = hash_credential("test_password").unwrap();
        assert!(hash.starts_with("$2b$12$"));
    }

    #[test]
    fn test_hash_credential_produces_unique_hashes() {
        let hash1 = hash_credential("same_password").unwrap();
        let hash2 = hash_credential("same_password").unwrap();
        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_credential_correct() {
        let password = "my_secure_password123!";
        let hash = hash_credential(password).unwrap();
        assert!(verify_credential(password, &hash).unwrap());
    }

    #[test]
    fn test_verify_credential_incorrect() {
        let hash = hash_credential("correct_password").unwrap();
        assert!(!verify_credential("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_pin_digits() {
        let hash = hash_credential("4821").unwrap();
        assert!(verify_credential("4821", &hash).unwrap());
        assert!(!verify_credential("4822", &hash).unwrap());
    }

    #[test]
    fn test_verify_credential_invalid_hash() {
        let result = verify_credential("password", "not_a_bcrypt_hash");
        assert!(matches!(result, Err(PasswordError::VerifyError(_))));
    }

    #[test]
    fn test_hash_credential_unicode() {
        let password = "密码123!пароль";
        let hash = hash_credential(password).unwrap();
        assert!(verify_credential(password, &hash).unwrap());
        assert!(!verify_credential("different", &hash).unwrap());
    }

    #[test]
    fn test_password_error_display() {
        let err = PasswordError::HashError("test error".to_string());
        assert!(format!("{}", err).contains("test error"));

        let err = PasswordError::VerifyError("bad hash".to_string());
        assert!(format!("{}", err).contains("bad hash"));
    }
}
