//! Deterministic password hashing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hashes passwords with HMAC-SHA256 keyed by a process-wide salt.
///
/// The same password and salt always produce the same digest, which lets the
/// login path look up the `(email, password_hash)` pair in a single query.
/// The salt lives in configuration, so a dump of the users table alone is not
/// enough to verify password guesses.
#[derive(Clone)]
pub struct Hasher {
    salt: String,
}

impl Hasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Returns the password digest as 64 lowercase hex characters.
    pub fn hash(&self, password: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.salt.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(password.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
