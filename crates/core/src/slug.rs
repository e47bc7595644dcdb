//! Public event slug (value object).
//!
//! Slugs address an event's public microsite and registration form, so they
//! end up verbatim in URL paths. Only lowercase ASCII letters, digits and
//! single hyphens are accepted.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

const MAX_LEN: usize = 100;

/// Validated, URL-safe event slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventSlug(String);

impl EventSlug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::invalid_slug(value, "must not be empty"));
        }
        if value.len() > MAX_LEN {
            return Err(DomainError::invalid_slug(value, "must be at most 100 characters"));
        }
        if !value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(DomainError::invalid_slug(
                value,
                "only lowercase letters, digits and hyphens are allowed",
            ));
        }
        if value.starts_with('-') || value.ends_with('-') {
            return Err(DomainError::invalid_slug(value, "must not start or end with a hyphen"));
        }
        if value.contains("--") {
            return Err(DomainError::invalid_slug(value, "must not contain consecutive hyphens"));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EventSlug {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EventSlug {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EventSlug {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventSlug> for String {
    fn from(value: EventSlug) -> Self {
        value.0
    }
}
