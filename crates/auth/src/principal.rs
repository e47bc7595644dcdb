use serde::{Deserialize, Serialize};

use evently_core::{OrganizationId, PrincipalId};

use crate::Role;

/// A principal's membership in an organization.
///
/// This is an authorization boundary object: it states *which organization*
/// the principal is acting within and which role it holds there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMembership {
    pub organization_id: OrganizationId,
    pub role: Role,
}

/// A fully resolved principal for authorization decisions.
///
/// Built from session claims handed over by the identity provider; this crate
/// never authenticates anyone itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub principal_id: PrincipalId,
    pub active_organization_id: OrganizationId,
    pub membership: OrganizationMembership,
}

impl Principal {
    pub fn new(principal_id: PrincipalId, organization_id: OrganizationId, role: Role) -> Self {
        Self {
            principal_id,
            active_organization_id: organization_id,
            membership: OrganizationMembership {
                organization_id,
                role,
            },
        }
    }

    pub fn role(&self) -> Role {
        self.membership.role
    }

    /// Whether the active organization is the one the membership was granted in.
    pub fn is_in_home_organization(&self) -> bool {
        self.active_organization_id == self.membership.organization_id
    }
}
