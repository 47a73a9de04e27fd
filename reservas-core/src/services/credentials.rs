//! Password storage schemes
//!
//! `Plain` keeps the password as typed, matching existing stores.
//! `Argon2` stores a salted PHC string (Argon2id, default params).

use std::fmt;
use std::str::FromStr;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PasswordScheme {
    #[default]
    Plain,
    Argon2,
}

impl PasswordScheme {
    /// Value to persist in `User::password`
    pub fn hash(&self, password: &str) -> Result<String> {
        match self {
            PasswordScheme::Plain => Ok(password.to_string()),
            PasswordScheme::Argon2 => {
                // 16-byte salt
                let salt_bytes: [u8; 16] = rand::thread_rng().gen();
                let salt = SaltString::encode_b64(&salt_bytes)
                    .map_err(|e| Error::Credential(format!("Failed to encode salt: {}", e)))?;
                let hash = Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map_err(|e| Error::Credential(format!("Failed to hash password: {}", e)))?;
                Ok(hash.to_string())
            }
        }
    }

    /// Check a typed password against the stored value
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match self {
            PasswordScheme::Plain => password == stored,
            PasswordScheme::Argon2 => match PasswordHash::new(stored) {
                Ok(hash) => Argon2::default()
                    .verify_password(password.as_bytes(), &hash)
                    .is_ok(),
                Err(_) => false,
            },
        }
    }

    /// Whether `stored` is a value this scheme produced
    pub fn recognizes(&self, stored: &str) -> bool {
        match self {
            PasswordScheme::Plain => true,
            PasswordScheme::Argon2 => PasswordHash::new(stored).is_ok(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordScheme::Plain => "plain",
            PasswordScheme::Argon2 => "argon2",
        }
    }
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PasswordScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(PasswordScheme::Plain),
            "argon2" => Ok(PasswordScheme::Argon2),
            other => Err(Error::Config(format!("unknown password scheme: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_exact_match() {
        let stored = PasswordScheme::Plain.hash("p1").unwrap();
        assert_eq!(stored, "p1");
        assert!(PasswordScheme::Plain.verify("p1", &stored));
        assert!(!PasswordScheme::Plain.verify("P1", &stored));
        assert!(!PasswordScheme::Plain.verify("p1 ", &stored));
    }

    #[test]
    fn test_argon2_round_trip() {
        let stored = PasswordScheme::Argon2.hash("secreto").unwrap();
        assert!(stored.starts_with("$argon2"));
        assert!(PasswordScheme::Argon2.verify("secreto", &stored));
        assert!(!PasswordScheme::Argon2.verify("Secreto", &stored));
    }

    #[test]
    fn test_argon2_salts_differ() {
        let a = PasswordScheme::Argon2.hash("same").unwrap();
        let b = PasswordScheme::Argon2.hash("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_argon2_rejects_plain_stored_value() {
        assert!(!PasswordScheme::Argon2.verify("admin123", "admin123"));
        assert!(!PasswordScheme::Argon2.recognizes("admin123"));
    }

    #[test]
    fn test_recognizes_own_values() {
        let stored = PasswordScheme::Argon2.hash("secreto").unwrap();
        assert!(PasswordScheme::Argon2.recognizes(&stored));
        assert!(PasswordScheme::Plain.recognizes(&stored));
        assert!(PasswordScheme::Plain.recognizes("secreto"));
    }
}
