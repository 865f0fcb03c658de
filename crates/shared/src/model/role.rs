use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The three kinds of account the portal knows about.
///
/// Matching on this enum is exhaustive everywhere a decision depends on the
/// role, so a new variant fails to compile until every policy handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SystemAdmin,
    Manager,
    Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::SystemAdmin, Role::Manager, Role::Owner];

    /// Where an authenticated user with this role lands by default.
    pub fn landing_path(self) -> &'static str {
        match self {
            Role::SystemAdmin => "/admin",
            Role::Manager => "/",
            Role::Owner => "/owner",
        }
    }

    /// The login surface that serves this role.
    pub fn login_path(self) -> &'static str {
        match self {
            Role::SystemAdmin => "/admin/login",
            Role::Manager => "/login",
            Role::Owner => "/owner-login",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SystemAdmin => "system_admin",
            Role::Manager => "manager",
            Role::Owner => "owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
