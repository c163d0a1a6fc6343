//! Tri-state access verdict.

use serde::{Deserialize, Serialize};

/// Outcome of a subsite access check.
///
/// `Delegate` means this layer has no opinion and a broader policy decides.
/// It must never be folded into `Allow` or `Deny`: an installation without
/// subsites answers `Delegate` for everyone, and treating that as a denial
/// would lock every non-admin member out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    Deny,
    Delegate,
}

impl AccessDecision {
    /// Returns `true` only for an explicit denial.
    #[must_use]
    pub fn is_denied(self) -> bool {
        self == Self::Deny
    }
}
