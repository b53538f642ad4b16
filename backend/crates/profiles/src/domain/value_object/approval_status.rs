//! Approval Status Value Object

use crate::error::{ProfileError, ProfileResult};

/// Lifecycle status of a department profile
///
/// Draft and Pending are the non-terminal states; review actions only
/// apply once a profile has left Draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum ApprovalStatus {
    Draft = 0,
    Pending = 1,
    Approved = 2,
    Rejected = 3,
    Inactive = 4,
}

impl ApprovalStatus {
    /// Numeric ID for database storage
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Status code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            ApprovalStatus::Draft => "draft",
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
            ApprovalStatus::Inactive => "inactive",
        }
    }

    /// Create from numeric ID; unknown values fall back to Draft
    pub fn from_id(id: i16) -> Self {
        match id {
            1 => ApprovalStatus::Pending,
            2 => ApprovalStatus::Approved,
            3 => ApprovalStatus::Rejected,
            4 => ApprovalStatus::Inactive,
            _ => ApprovalStatus::Draft,
        }
    }

    /// Whether the profile counts as a live submission
    ///
    /// Pending and Approved submissions block another submission for
    /// the same user and department.
    pub fn blocks_resubmission(&self) -> bool {
        matches!(self, ApprovalStatus::Pending | ApprovalStatus::Approved)
    }

    /// Whether staff may apply a review action
    pub fn is_reviewable(&self) -> bool {
        !matches!(self, ApprovalStatus::Draft)
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Staff review action on a submitted profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
    Deactivate,
    Activate,
}

impl ReviewAction {
    /// Parse an action string from the API
    pub fn parse(s: &str) -> ProfileResult<Self> {
        match s {
            "approve" => Ok(ReviewAction::Approve),
            "reject" => Ok(ReviewAction::Reject),
            "deactivate" => Ok(ReviewAction::Deactivate),
            "activate" => Ok(ReviewAction::Activate),
            other => Err(ProfileError::Validation(format!(
                "Unknown review action: {other}"
            ))),
        }
    }

    /// The status the profile moves to
    pub fn target_status(&self) -> ApprovalStatus {
        match self {
            ReviewAction::Approve | ReviewAction::Activate => ApprovalStatus::Approved,
            ReviewAction::Reject => ApprovalStatus::Rejected,
            ReviewAction::Deactivate => ApprovalStatus::Inactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for status in [
            ApprovalStatus::Draft,
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
            ApprovalStatus::Inactive,
        ] {
            assert_eq!(ApprovalStatus::from_id(status.id()), status);
        }
    }

    #[test]
    fn test_unknown_id_is_draft() {
        assert_eq!(ApprovalStatus::from_id(99), ApprovalStatus::Draft);
    }

    #[test]
    fn test_blocks_resubmission() {
        assert!(ApprovalStatus::Pending.blocks_resubmission());
        assert!(ApprovalStatus::Approved.blocks_resubmission());
        assert!(!ApprovalStatus::Draft.blocks_resubmission());
        assert!(!ApprovalStatus::Rejected.blocks_resubmission());
        assert!(!ApprovalStatus::Inactive.blocks_resubmission());
    }

    #[test]
    fn test_draft_is_not_reviewable() {
        assert!(!ApprovalStatus::Draft.is_reviewable());
        assert!(ApprovalStatus::Pending.is_reviewable());
    }

    #[test]
    fn test_action_targets() {
        assert_eq!(
            ReviewAction::Approve.target_status(),
            ApprovalStatus::Approved
        );
        assert_eq!(
            ReviewAction::Reject.target_status(),
            ApprovalStatus::Rejected
        );
        assert_eq!(
            ReviewAction::Deactivate.target_status(),
            ApprovalStatus::Inactive
        );
        assert_eq!(
            ReviewAction::Activate.target_status(),
            ApprovalStatus::Approved
        );
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(ReviewAction::parse("approve").unwrap(), ReviewAction::Approve);
        assert!(ReviewAction::parse("promote").is_err());
    }
}
