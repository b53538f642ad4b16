//! Department Name Value Object

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};

const MAX_LENGTH: usize = 64;

/// Validated department name, stored lowercase
///
/// Departments are free-form slugs ("direction", "cinematography",
/// "sound-design"); there is no fixed catalogue server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepartmentName(String);

impl DepartmentName {
    pub fn new(name: impl Into<String>) -> ProfileResult<Self> {
        let name = name.into().trim().to_lowercase();

        if name.is_empty() {
            return Err(ProfileError::Validation(
                "Department name cannot be empty".to_string(),
            ));
        }
        if name.len() > MAX_LENGTH {
            return Err(ProfileError::Validation(format!(
                "Department name cannot exceed {MAX_LENGTH} characters"
            )));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ' ')
        {
            return Err(ProfileError::Validation(
                "Department name contains invalid characters".to_string(),
            ));
        }

        Ok(Self(name))
    }

    /// Reconstruct from a trusted database value
    pub fn from_db(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DepartmentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DepartmentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
