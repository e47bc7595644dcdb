use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Fine-grained capability checked before an action.
///
/// The wire names (e.g. `"manage_billing"`) are what the identity provider and
/// the dashboard exchange; the enum itself is closed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageOrganization,
    ViewEvents,
    CreateEvents,
    EditEvents,
    DeleteEvents,
    ManageRegistrations,
    ManageMicrosites,
    ViewAnalytics,
    ManageBilling,
    ManageIntegrations,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown permission '{0}'")]
pub struct PermissionParseError(pub String);

impl Permission {
    pub const ALL: [Permission; 10] = [
        Permission::ManageOrganization,
        Permission::ViewEvents,
        Permission::CreateEvents,
        Permission::EditEvents,
        Permission::DeleteEvents,
        Permission::ManageRegistrations,
        Permission::ManageMicrosites,
        Permission::ViewAnalytics,
        Permission::ManageBilling,
        Permission::ManageIntegrations,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Permission::ManageOrganization => "manage_organization",
            Permission::ViewEvents => "view_events",
            Permission::CreateEvents => "create_events",
            Permission::EditEvents => "edit_events",
            Permission::DeleteEvents => "delete_events",
            Permission::ManageRegistrations => "manage_registrations",
            Permission::ManageMicrosites => "manage_microsites",
            Permission::ViewAnalytics => "view_analytics",
            Permission::ManageBilling => "manage_billing",
            Permission::ManageIntegrations => "manage_integrations",
        }
    }

    /// Least privileged role that holds this permission.
    ///
    /// This is the only place capabilities are assigned; the role table is
    /// derived from it.
    pub const fn minimum_role(self) -> Role {
        match self {
            Permission::ViewEvents | Permission::ViewAnalytics => Role::Member,
            Permission::CreateEvents
            | Permission::EditEvents
            | Permission::DeleteEvents
            | Permission::ManageRegistrations
            | Permission::ManageMicrosites => Role::Organizer,
            Permission::ManageOrganization
            | Permission::ManageBilling
            | Permission::ManageIntegrations => Role::Admin,
        }
    }

    /// Grouping used by the role management screens.
    pub const fn category(self) -> &'static str {
        match self {
            Permission::ManageOrganization => "organization",
            Permission::ViewEvents
            | Permission::CreateEvents
            | Permission::EditEvents
            | Permission::DeleteEvents => "events",
            Permission::ManageRegistrations => "registrations",
            Permission::ManageMicrosites => "microsites",
            Permission::ViewAnalytics => "analytics",
            Permission::ManageBilling => "billing",
            Permission::ManageIntegrations => "integrations",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Permission::ManageOrganization => "Edit organization settings and team membership",
            Permission::ViewEvents => "View events and their details",
            Permission::CreateEvents => "Create new events",
            Permission::EditEvents => "Update existing events",
            Permission::DeleteEvents => "Delete events",
            Permission::ManageRegistrations => "Review, approve and export attendee registrations",
            Permission::ManageMicrosites => "Build and publish event microsites",
            Permission::ViewAnalytics => "View attendance and engagement analytics",
            Permission::ManageBilling => "Manage plans, invoices and payment methods",
            Permission::ManageIntegrations => "Connect third-party integrations",
        }
    }
}

impl FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PermissionParseError(s.to_string()))
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
