//! The static password guarding the extended form.
//!
//! One secret is shared by every authorised officer. Only its Argon2id PHC
//! string is held in memory; a plaintext `FORM_PASSWORD` is hashed once at
//! startup and then dropped.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// A validated Argon2 PHC hash of the extended-form password.
#[derive(Debug, Clone)]
pub struct FormPassword {
    phc: String,
}

impl FormPassword {
    /// Accept a pre-computed PHC string, rejecting anything unparseable so a
    /// typo in `FORM_PASSWORD_HASH` fails at startup rather than on unlock.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, password_hash::Error> {
        let phc = phc.into();
        PasswordHash::new(&phc)?;
        Ok(Self { phc })
    }

    /// Hash `plain` with Argon2id and a random salt.
    pub fn from_plain(plain: &str) -> Result<Self, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(plain.as_bytes(), &salt)?;
        Ok(Self {
            phc: hash.to_string(),
        })
    }

    pub fn phc(&self) -> &str {
        &self.phc
    }

    /// Whether `attempt` is the password.
    pub fn matches(&self, attempt: &str) -> bool {
        match PasswordHash::new(&self.phc) {
            Ok(hash) => Argon2::default()
                .verify_password(attempt.as_bytes(), &hash)
                .is_ok(),
            Err(e) => {
                tracing::error!(error = %e, "Stored form password hash is unreadable");
                false
            }
        }
    }
}
