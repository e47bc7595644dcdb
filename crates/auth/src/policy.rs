//! Static access-control table: role → permissions, route → permission, and
//! role delegation ceilings.
//!
//! All three are derived from [`Role::rank`] and [`Permission::minimum_role`];
//! there is no second hand-maintained privilege ordering.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde::Serialize;

use crate::{Permission, Role};

/// Set of permissions granted to a role.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    pub fn is_superset(&self, other: &PermissionSet) -> bool {
        self.0.is_superset(&other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

static ROLE_PERMISSIONS: LazyLock<BTreeMap<Role, PermissionSet>> = LazyLock::new(|| {
    Role::ALL
        .into_iter()
        .map(|role| {
            let perms = Permission::ALL
                .into_iter()
                .filter(|p| role.outranks_or_equals(p.minimum_role()))
                .collect();
            (role, perms)
        })
        .collect()
});

static EMPTY: LazyLock<PermissionSet> = LazyLock::new(PermissionSet::default);

/// Dashboard routes that require a permission. Matching is exact; bracketed
/// segments are literal placeholders, not patterns.
pub const ROUTE_PERMISSIONS: &[(&str, Permission)] = &[
    ("/dashboard/settings", Permission::ManageOrganization),
    ("/dashboard/team", Permission::ManageOrganization),
    ("/dashboard/billing", Permission::ManageBilling),
    ("/dashboard/integrations", Permission::ManageIntegrations),
    ("/dashboard/analytics", Permission::ViewAnalytics),
    ("/dashboard/events", Permission::ViewEvents),
    ("/dashboard/events/new", Permission::CreateEvents),
    ("/dashboard/events/[id]", Permission::ViewEvents),
    ("/dashboard/events/[id]/edit", Permission::EditEvents),
    ("/dashboard/events/[id]/registrations", Permission::ManageRegistrations),
    ("/dashboard/events/[id]/microsite", Permission::ManageMicrosites),
];

/// Permissions granted to `role`.
pub fn permissions_for(role: Role) -> &'static PermissionSet {
    ROLE_PERMISSIONS.get(&role).unwrap_or(&EMPTY)
}

/// The whole role → permissions table, most privileged role first.
pub fn role_permissions() -> impl Iterator<Item = (Role, &'static PermissionSet)> {
    Role::ALL.into_iter().map(|role| (role, permissions_for(role)))
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(permission)
}

/// [`has_permission`] over untrusted names. Unknown names yield `false`.
pub fn has_permission_named(role: &str, permission: &str) -> bool {
    match (Role::parse(role), permission.parse::<Permission>()) {
        (Some(role), Ok(permission)) => has_permission(role, permission),
        _ => {
            tracing::trace!(role, permission, "unknown role or permission; denying");
            false
        }
    }
}

/// Permission required to reach `route_path`, if the route is gated.
pub fn required_permission(route_path: &str) -> Option<Permission> {
    ROUTE_PERMISSIONS
        .iter()
        .find(|(path, _)| *path == route_path)
        .map(|(_, perm)| *perm)
}

/// Whether `role` may reach `route_path`. Unmapped routes are open.
pub fn can_access_route(role: Role, route_path: &str) -> bool {
    match required_permission(route_path) {
        Some(perm) => has_permission(role, perm),
        None => true,
    }
}

/// [`can_access_route`] over an untrusted role name. Unknown roles may only
/// reach unmapped routes.
pub fn can_access_route_named(role: &str, route_path: &str) -> bool {
    match required_permission(route_path) {
        None => true,
        Some(perm) => Role::parse(role).is_some_and(|role| has_permission(role, perm)),
    }
}

/// Roles a holder of `current` may assign to others, most privileged first.
pub fn available_roles(current: Role) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|candidate| current.outranks_or_equals(*candidate))
        .collect()
}

/// [`available_roles`] over an untrusted role name; unknown roles get nothing.
pub fn available_roles_named(current: &str) -> Vec<Role> {
    Role::parse(current).map(available_roles).unwrap_or_default()
}

/// Whether `actor` may grant `target` to another principal.
pub fn can_assign_role(actor: Role, target: Role) -> bool {
    available_roles(actor).contains(&target)
}

/// Pairs `(higher, lower)` where the higher-ranked role does not hold every
/// permission of the lower one. Empty for a consistent table.
pub fn verify_privilege_ordering() -> Vec<(Role, Role)> {
    let mut violations = Vec::new();
    for higher in Role::ALL {
        for lower in Role::ALL {
            if higher.rank() > lower.rank()
                && !permissions_for(higher).is_superset(permissions_for(lower))
            {
                violations.push((higher, lower));
            }
        }
    }
    violations
}
