use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role
///
/// Applicants use the OTP sign-in flow; staff and admins are redirected
/// to the admin entry point and never reach code dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Applicant = 0,
    Staff = 1,
    Admin = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Applicant => "applicant",
            Staff => "staff",
            Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_staff_or_higher(&self) -> bool {
        use UserRole::*;
        matches!(self, Staff | Admin)
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Self {
        use UserRole::*;
        match id {
            0 => Applicant,
            1 => Staff,
            2 => Admin,
            _ => Applicant,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
