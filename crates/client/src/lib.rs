//! `evently-client`
//!
//! **Responsibility:** the one place the dashboard talks to the platform API.
//!
//! This crate provides:
//! - An explicitly constructed [`ApiClient`] (no process-wide instance)
//! - Response normalization: every outcome is an [`ApiResult`], never a panic
//! - Typed resource groups for events, organizations and public endpoints
//! - A generic exponential-backoff retry helper with cancellation

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod resources;
pub mod retry;
pub mod types;

pub use client::{ApiClient, RequestOptions};
pub use config::ClientConfig;
pub use envelope::{ApiResult, ApiSuccess, Envelope, Pagination};
pub use error::ApiError;
pub use resources::{EventsApi, OrganizationsApi, PublicApi};
pub use retry::{with_retry, with_retry_cancellable, RetryError, RetryPolicy};
pub use tokio_util::sync::CancellationToken;
