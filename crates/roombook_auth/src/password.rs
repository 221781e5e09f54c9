// --- File: crates/roombook_auth/src/password.rs ---
//! Salted password hashing with HMAC-SHA256.

use hmac::{Hmac, Mac};
use roombook_common::{internal_error, RoombookError};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// A fresh random salt.
pub fn new_salt() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Hex-encoded HMAC of the password keyed by the salt.
pub fn hash_password(password: &str, salt: &str) -> Result<String, RoombookError> {
    let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
        .map_err(|_| internal_error("Invalid password salt for HMAC"))?;
    mac.update(password.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Compare a password against a stored hash in constant time.
pub fn verify_password(password: &str, salt: &str, expected_hex: &str) -> bool {
    let Ok(expected) = hex::decode(expected_hex) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(salt.as_bytes()) else {
        return false;
    };
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}
