use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use evently_core::{OrganizationId, PrincipalId};

use crate::{has_permission, permissions_for, role_permissions, Permission, Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("organization mismatch")]
    OrganizationMismatch,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(Permission),
}

/// Authorize a principal within its active organization.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, required: Permission) -> Result<(), AuthzError> {
    if !principal.is_in_home_organization() {
        return Err(AuthzError::OrganizationMismatch);
    }

    if has_permission(principal.role(), required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
///
/// Answers "why was this allowed/denied?" for audit logs and the team
/// management screen.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub required_permission: Permission,
    pub granted: bool,
    pub reason: String,
    pub principal: PrincipalState,
    pub denial_reason: Option<DenialReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrincipalState {
    pub principal_id: PrincipalId,
    pub active_organization_id: OrganizationId,
    pub membership_organization_id: OrganizationId,
    pub role: Role,
    pub effective_permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    OrganizationMismatch,
    MissingPermission,
}

/// Explain why [`authorize`] would allow or deny `required` for `principal`.
pub fn explain_authorization(
    principal: &Principal,
    required: Permission,
) -> AuthorizationExplanation {
    let role = principal.role();
    let state = PrincipalState {
        principal_id: principal.principal_id,
        active_organization_id: principal.active_organization_id,
        membership_organization_id: principal.membership.organization_id,
        role,
        effective_permissions: permissions_for(role).iter().collect(),
    };

    if !principal.is_in_home_organization() {
        return AuthorizationExplanation {
            required_permission: required,
            granted: false,
            reason: format!(
                "Organization mismatch: principal is active in {} but its membership is for {}",
                principal.active_organization_id, principal.membership.organization_id
            ),
            principal: state,
            denial_reason: Some(DenialReason {
                kind: DenialKind::OrganizationMismatch,
                message: "Principal is acting in a different organization than its membership"
                    .to_string(),
                suggestions: vec![
                    "Switch the active organization back to the one the session was issued for"
                        .to_string(),
                ],
            }),
        };
    }

    if has_permission(role, required) {
        return AuthorizationExplanation {
            required_permission: required,
            granted: true,
            reason: format!("Role '{role}' grants '{required}'"),
            principal: state,
            denial_reason: None,
        };
    }

    let minimum = required.minimum_role();
    AuthorizationExplanation {
        required_permission: required,
        granted: false,
        reason: format!(
            "Role '{role}' does not grant '{required}'. Current permissions: {:?}",
            state
                .effective_permissions
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
        ),
        principal: state,
        denial_reason: Some(DenialReason {
            kind: DenialKind::MissingPermission,
            message: format!("Missing required permission: '{required}'"),
            suggestions: vec![format!(
                "Ask an administrator to assign the '{minimum}' role or higher"
            )],
        }),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Role definition with its granted permissions (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub name: Role,
    pub rank: u8,
    pub description: &'static str,
    pub permissions: Vec<Permission>,
    pub assignable_roles: Vec<Role>,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub name: Permission,
    pub description: &'static str,
    pub category: &'static str,
    pub minimum_role: Role,
}

/// Complete, serializable view of the RBAC model.
#[derive(Debug, Clone, Serialize)]
pub struct RbacRegistry {
    pub roles: BTreeMap<&'static str, RoleDefinition>,
    pub permissions: BTreeMap<&'static str, PermissionDefinition>,
}

impl RbacRegistry {
    pub fn build() -> Self {
        let roles = role_permissions()
            .map(|(role, perms)| {
                (
                    role.as_str(),
                    RoleDefinition {
                        name: role,
                        rank: role.rank(),
                        description: role.description(),
                        permissions: perms.iter().collect(),
                        assignable_roles: crate::available_roles(role),
                    },
                )
            })
            .collect();

        let permissions = Permission::ALL
            .into_iter()
            .map(|perm| {
                (
                    perm.as_str(),
                    PermissionDefinition {
                        name: perm,
                        description: perm.description(),
                        category: perm.category(),
                        minimum_role: perm.minimum_role(),
                    },
                )
            })
            .collect();

        Self { roles, permissions }
    }
}
