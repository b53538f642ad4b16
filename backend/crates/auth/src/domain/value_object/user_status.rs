use serde::{Deserialize, Serialize};

/// Account status
///
/// Disabled accounts are refused at the password step, before any code
/// is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserStatus {
    #[default]
    Active = 0,
    Disabled = 1,
}

impl UserStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub fn from_id(id: i16) -> Self {
        match id {
            1 => UserStatus::Disabled,
            _ => UserStatus::Active,
        }
    }

    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(UserStatus::from_id(0), UserStatus::Active);
        assert_eq!(UserStatus::from_id(1), UserStatus::Disabled);
    }

    #[test]
    fn test_can_login() {
        assert!(UserStatus::Active.can_login());
        assert!(!UserStatus::Disabled.can_login());
    }
}
