//! UserName Value Object
//!
//! Display name chosen at registration. A canonical (NFKC, lowercased)
//! form is stored alongside the original for uniqueness checks.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

const USER_NAME_MIN_LENGTH: usize = 3;
const USER_NAME_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new user name with validation
    pub fn new(name: &str) -> AppResult<Self> {
        let original = name.trim().to_string();

        let char_count = original.chars().count();
        if char_count < USER_NAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "User name must be at least {} characters",
                USER_NAME_MIN_LENGTH
            )));
        }
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "User name must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        if !original
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == ' ' || c == '.')
        {
            return Err(AppError::bad_request(
                "User name contains invalid characters",
            ));
        }

        let canonical = Self::canonicalize(&original);

        Ok(Self {
            original,
            canonical,
        })
    }

    /// Restore from database value (assumed already validated)
    pub fn from_db(name: &str) -> Self {
        Self {
            original: name.to_string(),
            canonical: Self::canonicalize(name),
        }
    }

    fn canonicalize(name: &str) -> String {
        name.nfkc().collect::<String>().to_lowercase()
    }

    /// The name as entered at registration
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The normalized form used for uniqueness checks
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original)
    }
}
