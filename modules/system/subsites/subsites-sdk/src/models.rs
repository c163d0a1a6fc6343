//! Domain models for the subsites module.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a subsite.
pub type SubsiteId = u64;

/// Identifier of a member group.
pub type GroupId = u64;

/// Identifier of an admin member.
pub type MemberId = Uuid;

/// Reserved id of the main (global) site.
pub const MAIN_SITE_ID: SubsiteId = 0;

/// Capability names understood by the permission oracle.
pub mod capabilities {
    /// Full administrative rights.
    pub const ADMIN: &str = "ADMIN";
    /// Access to all admin sections.
    pub const CMS_ACCESS_ALL: &str = "CMS_ACCESS_LeftAndMain";
}

/// A tenant partition of the installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsite {
    /// Unique subsite identifier. `0` is the main site.
    pub id: SubsiteId,
    /// Human-readable title.
    pub title: String,
    /// Whether this is the default ("main") site of the installation.
    #[serde(default)]
    pub is_default: bool,
}

impl Subsite {
    /// Synthetic entry standing for the main site when none is persisted.
    #[must_use]
    pub fn main_site(title: &str) -> Self {
        Self {
            id: MAIN_SITE_ID,
            title: title.to_owned(),
            is_default: true,
        }
    }
}

/// A member group and its subsite grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    #[serde(default)]
    pub title: String,
    /// Grants access to every subsite, present and future.
    #[serde(default)]
    pub access_all_subsites: bool,
    /// Subsites this group is explicitly granted.
    #[serde(default)]
    pub subsite_ids: BTreeSet<SubsiteId>,
}

impl Group {
    /// Returns `true` if this group grants access to `subsite_id`.
    #[must_use]
    pub fn grants(&self, subsite_id: SubsiteId) -> bool {
        self.access_all_subsites || self.subsite_ids.contains(&subsite_id)
    }
}

/// An authenticated admin member.
///
/// Capabilities (admin rights and the like) are not stored here; they are
/// answered by a [`PermissionOracle`](crate::PermissionOracle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Member {
    #[must_use]
    pub fn new(id: MemberId) -> Self {
        Self {
            id,
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }
}

/// The record an admin section is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    pub id: u64,
    /// Owning subsite. `None` for record types that are not subsite-aware.
    pub subsite_id: Option<SubsiteId>,
}
