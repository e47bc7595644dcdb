//! `evently-core` — domain primitives shared by the access-control and client crates.
//!
//! This crate contains **pure domain** types (no transport or IO concerns).

pub mod error;
pub mod id;
pub mod slug;

pub use error::{DomainError, DomainResult};
pub use id::{EventId, OrganizationId, PrincipalId, RegistrationId};
pub use slug::EventSlug;
