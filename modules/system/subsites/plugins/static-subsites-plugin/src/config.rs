//! Configuration for the static subsites plugin.

use serde::Deserialize;
use subsites_sdk::{GroupId, MemberId, SubsiteId};

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticSubsitesPluginConfig {
    /// Persisted subsites, in catalog order.
    pub subsites: Vec<SubsiteConfig>,

    /// Member groups and their subsite grants.
    pub groups: Vec<GroupConfig>,

    /// Known members with their capabilities and group memberships.
    pub members: Vec<MemberConfig>,
}

/// Configuration for a single subsite.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubsiteConfig {
    pub id: SubsiteId,

    pub title: String,

    /// At most one subsite may be the default.
    #[serde(default)]
    pub is_default: bool,
}

/// Configuration for a member group.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    pub id: GroupId,

    #[serde(default)]
    pub title: String,

    /// Grants every subsite, including ones added later.
    #[serde(default)]
    pub access_all_subsites: bool,

    /// Explicitly granted subsites.
    #[serde(default)]
    pub subsite_ids: Vec<SubsiteId>,
}

/// Configuration for a member.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberConfig {
    pub id: MemberId,

    /// Capability names, e.g. `ADMIN`.
    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Ids of the groups the member belongs to.
    #[serde(default)]
    pub groups: Vec<GroupId>,
}
