//! TOTP Secret Value Object
//!
//! Wraps the shared secret behind the emailed verification codes.
//! Standard 30-second steps, 6 digits, with a ±2 step skew window to
//! absorb clock drift and the delay between dispatch and submission.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use totp_rs::{Algorithm, Secret, TOTP};

/// TOTP configuration constants
const TOTP_DIGITS: usize = 6;
const TOTP_STEP: u64 = 30;
const TOTP_SKEW: u8 = 2;
const TOTP_ISSUER: &str = "24 Cine Crafts";

/// TOTP secret for the second sign-in factor
///
/// Generated once at first provisioning and never rotated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotpSecret {
    /// Base32-encoded secret
    secret_base32: String,
}

impl TotpSecret {
    /// Generate a new random TOTP secret
    pub fn generate() -> Self {
        let secret = Secret::generate_secret();
        Self {
            secret_base32: secret.to_encoded().to_string(),
        }
    }

    /// Create from a base32-encoded string (from database)
    pub fn from_base32(secret: impl Into<String>) -> AppResult<Self> {
        let secret_str = secret.into();
        // Validate by trying to decode
        Secret::Encoded(secret_str.clone())
            .to_bytes()
            .map_err(|e| AppError::internal(format!("Invalid TOTP secret: {}", e)))?;

        Ok(Self {
            secret_base32: secret_str,
        })
    }

    /// Get the base32-encoded secret for storage
    pub fn as_base32(&self) -> &str {
        &self.secret_base32
    }

    fn to_totp(&self, account_name: &str) -> AppResult<TOTP> {
        let secret = Secret::Encoded(self.secret_base32.clone());

        TOTP::new(
            Algorithm::SHA1,
            TOTP_DIGITS,
            TOTP_SKEW,
            TOTP_STEP,
            secret
                .to_bytes()
                .map_err(|e| AppError::internal(format!("Invalid TOTP secret: {}", e)))?,
            Some(TOTP_ISSUER.to_string()),
            account_name.to_string(),
        )
        .map_err(|e| AppError::internal(format!("Failed to create TOTP: {}", e)))
    }

    /// Generate the code for the current time step
    ///
    /// This is the code dispatched to the user by email.
    pub fn current_code(&self, account_name: &str) -> AppResult<String> {
        let totp = self.to_totp(account_name)?;
        totp.generate_current()
            .map_err(|e| AppError::internal(format!("Failed to generate TOTP: {}", e)))
    }

    /// Verify a submitted code within the skew window
    ///
    /// Empty or non-numeric input returns false, never errors. Does not
    /// touch attempt counters; callers do the lockout bookkeeping.
    pub fn verify(&self, code: &str, account_name: &str) -> AppResult<bool> {
        let code = code.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Ok(false);
        }

        let totp = self.to_totp(account_name)?;
        Ok(totp.check_current(code).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totp_secret_generate() {
        let secret = TotpSecret::generate();
        assert!(!secret.as_base32().is_empty());
    }

    #[test]
    fn test_totp_current_code_verifies() {
        let secret = TotpSecret::generate();
        let account = "crew@example.com";

        let code = secret.current_code(account).unwrap();
        assert_eq!(code.len(), 6);
        assert!(secret.verify(&code, account).unwrap());
    }

    #[test]
    fn test_totp_wrong_code_rejected() {
        let secret = TotpSecret::generate();
        let account = "crew@example.com";

        let code = secret.current_code(account).unwrap();
        // Flip the last digit
        let wrong = format!(
            "{}{}",
            &code[..5],
            (code.as_bytes()[5] - b'0' + 1) % 10
        );
        assert!(!secret.verify(&wrong, account).unwrap());
    }

    #[test]
    fn test_totp_garbage_input_is_false_not_error() {
        let secret = TotpSecret::generate();
        let account = "crew@example.com";

        assert!(!secret.verify("", account).unwrap());
        assert!(!secret.verify("   ", account).unwrap());
        assert!(!secret.verify("abc123", account).unwrap());
        assert!(!secret.verify("12 34 56", account).unwrap());
    }

    #[test]
    fn test_totp_secret_from_base32() {
        let secret = TotpSecret::generate();
        let base32 = secret.as_base32().to_string();

        let restored = TotpSecret::from_base32(base32).unwrap();
        assert_eq!(secret.as_base32(), restored.as_base32());
    }

    #[test]
    fn test_totp_deterministic_within_step() {
        let secret = TotpSecret::generate();
        let account = "crew@example.com";

        let a = secret.current_code(account).unwrap();
        let b = secret.current_code(account).unwrap();
        // Two calls within the same (or adjacent) step both verify
        assert!(secret.verify(&a, account).unwrap());
        assert!(secret.verify(&b, account).unwrap());
    }
}
