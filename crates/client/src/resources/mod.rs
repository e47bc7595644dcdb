//! Resource groups: thin wrappers over [`crate::ApiClient::request`] that fix
//! the method and path for each endpoint.

mod events;
mod organizations;
mod public;

pub use events::EventsApi;
pub use organizations::OrganizationsApi;
pub use public::PublicApi;
