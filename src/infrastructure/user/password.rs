//! Password hashing implementations
//!
//! Two schemes live behind the `PasswordHasher` trait: Argon2 with a
//! random salt (the default), and the legacy deterministic two-round
//! SHA-512 scheme with a configured salt and pepper, kept for
//! compatibility with rows hashed by earlier deployments.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sha2::{Digest, Sha512};
use std::fmt::Debug;

use crate::config::{PasswordConfig, PasswordScheme};
use crate::domain::DomainError;

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Build the configured hasher
pub fn hasher_from_config(config: &PasswordConfig) -> Box<dyn PasswordHasher> {
    match config.scheme {
        PasswordScheme::Argon2 => Box::new(Argon2Hasher::new()),
        PasswordScheme::Sha512 => Box::new(Sha512Hasher::new(&config.salt, &config.pepper)),
    }
}

/// Argon2-based password hasher
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Create a new Argon2 hasher
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Deterministic two-round SHA-512 hasher with salt and pepper
///
/// Produces `hex(sha512(hex(sha512(password + salt)) + pepper))`.
#[derive(Debug, Clone)]
pub struct Sha512Hasher {
    salt: String,
    pepper: String,
}

impl Sha512Hasher {
    pub fn new(salt: impl Into<String>, pepper: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            pepper: pepper.into(),
        }
    }

    fn digest(&self, password: &str) -> String {
        let first = hex::encode(Sha512::digest(format!("{}{}", password, self.salt)));
        hex::encode(Sha512::digest(format!("{}{}", first, self.pepper)))
    }
}

impl PasswordHasher for Sha512Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(self.digest(password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        self.digest(password) == hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_hash_and_verify() {
        let hasher = Argon2Hasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).unwrap();

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_argon2_hash_is_unique() {
        let hasher = Argon2Hasher::new();
        let password = "my_secure_password";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // Hashes differ due to the random salt but both verify
        assert_ne!(hash1, hash2);
        assert!(hasher.verify(password, &hash1));
        assert!(hasher.verify(password, &hash2));
    }

    #[test]
    fn test_argon2_invalid_hash() {
        let hasher = Argon2Hasher::new();

        assert!(!hasher.verify("password", "invalid_hash_format"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_sha512_is_deterministic() {
        let hasher = Sha512Hasher::new("salt", "pepper");

        let hash1 = hasher.hash("my_secure_password").unwrap();
        let hash2 = hasher.hash("my_secure_password").unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 128); // hex of a 512-bit digest
        assert!(hasher.verify("my_secure_password", &hash1));
        assert!(!hasher.verify("wrong_password", &hash1));
    }

    #[test]
    fn test_sha512_salt_and_pepper_matter() {
        let base = Sha512Hasher::new("salt", "pepper");
        let other_salt = Sha512Hasher::new("other", "pepper");
        let other_pepper = Sha512Hasher::new("salt", "other");

        let hash = base.hash("password123").unwrap();

        assert_ne!(other_salt.hash("password123").unwrap(), hash);
        assert_ne!(other_pepper.hash("password123").unwrap(), hash);
        assert!(!other_salt.verify("password123", &hash));
    }

    #[test]
    fn test_sha512_two_rounds() {
        // The digest must be sha512 applied twice, with the salt in the
        // first round and the pepper in the second
        let hasher = Sha512Hasher::new("s", "p");

        let first = hex::encode(Sha512::digest("passwords"));
        let expected = hex::encode(Sha512::digest(format!("{}p", first)));

        assert_eq!(hasher.hash("password").unwrap(), expected);
    }

    #[test]
    fn test_hasher_from_config() {
        let argon2 = hasher_from_config(&PasswordConfig::default());
        let hash = argon2.hash("password123").unwrap();
        assert!(hash.starts_with("$argon2"));

        let sha512 = hasher_from_config(&PasswordConfig {
            scheme: PasswordScheme::Sha512,
            salt: "s".to_string(),
            pepper: "p".to_string(),
        });
        let hash = sha512.hash("password123").unwrap();
        assert_eq!(hash.len(), 128);
    }
}
