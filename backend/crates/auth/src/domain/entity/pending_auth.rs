//! Pending Auth Entity
//!
//! Marks that a password check succeeded and a verification code is
//! awaited. Created only after the code was dispatched successfully;
//! consumed on successful verification; otherwise left to expire.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::user_id::UserId;

#[derive(Debug, Clone)]
pub struct PendingAuth {
    /// Marker ID (UUID v4), referenced by the signed pending cookie
    pub pending_id: Uuid,
    /// User who passed the password check
    pub user_id: UserId,
    /// Expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl PendingAuth {
    /// Create a new pending marker
    ///
    /// TTL comes from the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            pending_id: Uuid::new_v4(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    /// Whether the marker has expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() > self.expires_at_ms
    }
}
