//! Salted Argon2 password hashes.
//!
//! Only the PHC-format hash (`$argon2id$...`) is ever stored. Plain text
//! comes in through [`Password::new`] and [`Password::verify`] and is
//! dropped right after.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct Password {
    phc: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

impl Password {
    /// Hash `plain_text` under a fresh random salt.
    ///
    /// # Errors
    /// `Validation` for an empty password, `Internal` if Argon2 fails.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation("Password must not be empty"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Argon2 hashing failed: {}", e)))?
            .to_string();

        Ok(Self { phc })
    }

    /// Wrap a hash read back from the `users.password` column.
    pub fn from_hash(phc: String) -> Self {
        Self { phc }
    }

    pub fn as_phc(&self) -> &str {
        &self.phc
    }

    pub fn into_string(self) -> String {
        self.phc
    }

    /// Check a candidate against the stored hash.
    ///
    /// A hash that does not parse never matches.
    pub fn verify(&self, candidate: &str) -> bool {
        match PasswordHash::new(&self.phc) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }
}
