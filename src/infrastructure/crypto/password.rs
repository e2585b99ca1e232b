//! Password hashing utilities
//!
//! Secrets are stored as salted bcrypt hashes; `bcrypt::verify` compares
//! in constant time.

use bcrypt::{hash, verify};

/// Hash a password using bcrypt at an explicit cost (4..=31)
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hashed = hash_password_with_cost("s3cret!", 4).unwrap();
        assert_ne!(hashed, "s3cret!");
        assert!(verify_password("s3cret!", &hashed).unwrap());
        assert!(!verify_password("S3cret!", &hashed).unwrap());
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = hash_password_with_cost("repeat", 4).unwrap();
        let b = hash_password_with_cost("repeat", 4).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn plaintext_stored_value_never_verifies() {
        assert!(verify_password("letmein", "letmein").is_err());
    }
}
