//! Collaborator traits consumed by the subsites module.
//!
//! The host (or `static_subsites_plugin`) implements these; the subsites
//! core never talks to storage, sessions or the permission system directly.

use serde_json::Value;

use crate::error::SubsitesError;
use crate::models::{Member, Subsite};

/// Read-only access to the persisted subsites.
pub trait SubsiteCatalog: Send + Sync {
    /// All persisted subsites in catalog order.
    ///
    /// An empty list is a valid answer (single-tenant installation).
    ///
    /// # Errors
    ///
    /// - `Catalog` if the backing store cannot be read
    fn subsites(&self) -> Result<Vec<Subsite>, SubsitesError>;

    /// Whether any subsite is persisted.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the backing store cannot be read
    fn exists(&self) -> Result<bool, SubsitesError> {
        Ok(!self.subsites()?.is_empty())
    }
}

/// Answers capability checks for a member (e.g. `ADMIN`).
pub trait PermissionOracle: Send + Sync {
    fn has_capability(&self, member: &Member, capability: &str) -> bool;
}

/// Session-scoped key/value storage of the admin session.
///
/// Implementations are expected to use interior mutability; a session is
/// shared by the requests of one authenticated user.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value);

    fn clear(&self, key: &str);
}
