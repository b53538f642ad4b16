//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, public_id::PublicId, user_id::UserId, user_name::UserName, user_role::UserRole,
    user_status::UserStatus,
};

/// User entity
///
/// Sensitive authentication data (password hash, TOTP secret) lives in
/// separate entities; this record is safe to load on every request.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal ID (UUID v4)
    pub user_id: UserId,
    /// Public ID for API responses
    pub public_id: PublicId,
    /// Display name
    pub user_name: UserName,
    /// Login email (unique)
    pub email: Email,
    /// Role (applicant / staff / admin)
    pub user_role: UserRole,
    /// Active / disabled
    pub user_status: UserStatus,
    /// Last successful login
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new applicant account
    pub fn new(user_name: UserName, email: Email) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            public_id: PublicId::new(),
            user_name,
            email,
            user_role: UserRole::Applicant,
            user_status: UserStatus::Active,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new staff account
    pub fn new_staff(user_name: UserName, email: Email) -> Self {
        Self {
            user_role: UserRole::Staff,
            ..Self::new(user_name, email)
        }
    }

    /// Whether the account may sign in at all
    pub fn can_login(&self) -> bool {
        self.user_status.can_login()
    }

    /// Record a successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            UserName::new("Asha Kumar").unwrap(),
            Email::new("asha@example.com").unwrap(),
        )
    }

    #[test]
    fn test_new_user_is_active_applicant() {
        let user = user();
        assert_eq!(user.user_role, UserRole::Applicant);
        assert_eq!(user.user_status, UserStatus::Active);
        assert!(user.can_login());
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_new_staff_has_staff_role() {
        let staff = User::new_staff(
            UserName::new("Studio Manager").unwrap(),
            Email::new("manager@example.com").unwrap(),
        );
        assert_eq!(staff.user_role, UserRole::Staff);
        assert!(staff.user_role.is_staff_or_higher());
        assert!(staff.can_login());
    }

    #[test]
    fn test_disabled_user_cannot_login() {
        let mut user = user();
        user.user_status = UserStatus::Disabled;
        assert!(!user.can_login());
    }

    #[test]
    fn test_record_login_sets_timestamp() {
        let mut user = user();
        user.record_login();
        assert!(user.last_login_at.is_some());
    }
}
