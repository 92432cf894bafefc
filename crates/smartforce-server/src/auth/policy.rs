//! Authorization predicates
//!
//! Pure attribute comparisons, no database access.

use super::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        self == Access::Allow
    }
}

/// The two parties that own a training
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingOwners {
    pub user_id: i64,
    pub professor_id: i64,
}

/// A caller may touch a training when they are its trainee or its author.
pub fn can_access_training(caller: &AuthUser, owners: TrainingOwners) -> Access {
    if caller.is_student(owners.user_id) || caller.is_professor(owners.professor_id) {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// Students manage only their own account.
pub fn can_manage_user(caller: &AuthUser, user_id: i64) -> Access {
    if caller.is_student(user_id) {
        Access::Allow
    } else {
        Access::Deny
    }
}
