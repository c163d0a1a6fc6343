//! Error types for the subsites module.

use thiserror::Error;

/// Errors that can occur when using the subsites API.
///
/// Denial of access is not an error; it is reported through
/// [`AccessDecision::Deny`](crate::AccessDecision) or a resolver outcome.
#[derive(Debug, Error)]
pub enum SubsitesError {
    /// The subsite catalog could not be read.
    #[error("subsite catalog unavailable: {0}")]
    Catalog(String),

    /// A section name was not found in the registry.
    #[error("unknown admin section: {name}")]
    UnknownSection {
        /// The section name that was looked up.
        name: String,
    },

    /// A section with the same name is already registered.
    #[error("admin section already registered: {name}")]
    DuplicateSection {
        /// The conflicting section name.
        name: String,
    },

    /// The request URL could not be parsed.
    #[error("invalid request url '{url}': {reason}")]
    InvalidRequest {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SubsitesError {
    #[must_use]
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
