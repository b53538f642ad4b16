//! Password Value Objects
//!
//! Thin wrappers over the platform password types:
//! - `RawPassword`: validated clear text, zeroized on drop
//! - `UserPassword`: stored Argon2id hash (PHC string)

use platform::password::{ClearTextPassword, HashedPassword};

use crate::error::{AuthError, AuthResult};

/// Validated clear text password
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a submitted password against the password policy
    pub fn new(raw: String) -> AuthResult<Self> {
        let password = ClearTextPassword::new(raw)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;
        Ok(Self(password))
    }

    fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

/// Stored password hash
#[derive(Debug, Clone)]
pub struct UserPassword(String);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn hash(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        let hashed = raw
            .inner()
            .hash(pepper)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(Self(hashed.as_phc_string().to_string()))
    }

    /// Restore from database value
    pub fn from_db(hash: String) -> Self {
        Self(hash)
    }

    /// Get the PHC string for storage
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify a raw password against this hash
    ///
    /// A malformed stored hash verifies as false rather than erroring;
    /// the account is effectively unusable until the hash is reset.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        match HashedPassword::from_phc_string(self.0.clone()) {
            Ok(hashed) => hashed.verify(raw.inner(), pepper),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("CorrectHorse#42".to_string()).unwrap();
        let stored = UserPassword::hash(&raw, None).unwrap();

        assert!(stored.verify(&raw, None));

        let wrong = RawPassword::new("WrongBattery#42".to_string()).unwrap();
        assert!(!stored.verify(&wrong, None));
    }

    #[test]
    fn test_policy_rejection() {
        assert!(matches!(
            RawPassword::new("short".to_string()),
            Err(AuthError::PasswordValidation(_))
        ));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let raw = RawPassword::new("CorrectHorse#42".to_string()).unwrap();
        let stored = UserPassword::from_db("garbage".to_string());
        assert!(!stored.verify(&raw, None));
    }
}
