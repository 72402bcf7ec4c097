use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::utils::random_bytes;

use super::errors::UserError;

/// Hash a password into an Argon2id PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, UserError> {
    let salt_bytes = random_bytes::<16>().map_err(|e| UserError::Crypto(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| UserError::Crypto(e.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| UserError::Crypto(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Check a password against a stored PHC string. Malformed hashes never verify.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}
