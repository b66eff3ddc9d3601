use sha2::{Digest, Sha256};

/// SHA-256 hex digest of the password.
///
/// This matches the digest format of the system's existing account records,
/// so stored hashes keep verifying.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Constant-format comparison of a candidate password against a stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}
