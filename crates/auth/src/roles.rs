use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse-grained principal category within an organization.
///
/// Roles form a total privilege order (see [`Role::rank`]). Both the
/// role→permission table and the delegation ceilings are derived from that
/// order, so they cannot drift apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Organizer,
    Member,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct RoleParseError(pub String);

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Organizer, Role::Member];

    /// Privilege rank; higher ranks hold every capability of lower ranks.
    pub const fn rank(self) -> u8 {
        match self {
            Role::Admin => 3,
            Role::Organizer => 2,
            Role::Member => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Organizer => "organizer",
            Role::Member => "member",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Role::Admin => "Organization administrator with every permission, including billing",
            Role::Organizer => "Runs events: creates, edits and publishes them and manages attendees",
            Role::Member => "Read-only access to events and their analytics",
        }
    }

    /// Lenient parse for untrusted input: `None` for anything unknown.
    pub fn parse(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Whether `self` is at least as privileged as `other`.
    pub fn outranks_or_equals(self, other: Role) -> bool {
        self.rank() >= other.rank()
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "organizer" => Ok(Role::Organizer),
            "member" => Ok(Role::Member),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
