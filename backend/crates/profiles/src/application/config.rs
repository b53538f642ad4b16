//! Application Configuration

/// Profiles application configuration
#[derive(Debug, Clone)]
pub struct ProfilesConfig {
    /// How many recent submissions the admin overview returns
    pub recent_limit: i64,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self { recent_limit: 10 }
    }
}

impl ProfilesConfig {
    /// Create config for development
    pub fn development() -> Self {
        Self::default()
    }
}
