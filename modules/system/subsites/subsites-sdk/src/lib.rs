//! Subsites SDK
//!
//! This crate provides the public surface of the `subsites` module:
//!
//! - [`Subsite`], [`Group`], [`Member`], [`RecordRef`] - Domain models
//! - [`AccessDecision`] - Tri-state verdict (allow / deny / delegate)
//! - [`SubsiteCatalog`], [`PermissionOracle`], [`SessionStore`] - Collaborator
//!   traits implemented by the host (or by `static_subsites_plugin`)
//! - [`SubsitesError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use subsites_sdk::{AccessDecision, SubsiteCatalog};
//!
//! let subsites = catalog.subsites()?;
//! match evaluator.evaluate(Some(&member), subsite_id)? {
//!     AccessDecision::Deny => { /* explicitly forbidden */ }
//!     AccessDecision::Allow | AccessDecision::Delegate => { /* not forbidden here */ }
//! }
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod decision;
pub mod error;
pub mod models;

pub use api::{PermissionOracle, SessionStore, SubsiteCatalog};
pub use decision::AccessDecision;
pub use error::SubsitesError;
pub use models::{
    Group, GroupId, MAIN_SITE_ID, Member, MemberId, RecordRef, Subsite, SubsiteId, capabilities,
};
