//! Domain types shared between the server and its tooling

use serde::{Deserialize, Serialize};

use crate::error::CommonError;

/// Kind of account behind an authenticated identity.
///
/// A `Student` identity refers to a row in `users`, a `Professor` identity
/// to a row in `professors`. The two id spaces are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Professor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = CommonError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" | "user" => Ok(Role::Student),
            "professor" | "trainer" => Ok(Role::Professor),
            other => Err(CommonError::InvalidRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
