//! Member roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access level of a member account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Manages clients, members and statuses
    Admin,
    /// Works on projects
    #[default]
    User,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, MemberRole::Admin)
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a role name that is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("unknown member role: {0}")]
pub struct UnknownRole(pub String);

impl TryFrom<String> for MemberRole {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for MemberRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(MemberRole::Admin),
            "user" => Ok(MemberRole::User),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
