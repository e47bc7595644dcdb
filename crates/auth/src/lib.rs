//! `evently-auth` — role-based access control for the organizer dashboard.
//!
//! Everything here is a pure function over static tables: no IO, no panics.
//! UI code can call the checks unconditionally during render; unknown roles and
//! permissions fail closed.

pub mod authorize;
pub mod claims;
pub mod permissions;
pub mod policy;
pub mod principal;
pub mod roles;

pub use authorize::{
    authorize, explain_authorization, AuthorizationExplanation, AuthzError, DenialKind,
    RbacRegistry,
};
pub use claims::{validate_claims, SessionClaims, TokenValidationError};
pub use permissions::{Permission, PermissionParseError};
pub use policy::{
    available_roles, available_roles_named, can_access_route, can_access_route_named,
    can_assign_role, has_permission, has_permission_named, permissions_for, required_permission,
    role_permissions, verify_privilege_ordering, PermissionSet, ROUTE_PERMISSIONS,
};
pub use principal::{OrganizationMembership, Principal};
pub use roles::{Role, RoleParseError};

pub use evently_core::PrincipalId;
