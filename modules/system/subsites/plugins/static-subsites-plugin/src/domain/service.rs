//! Domain service for the static subsites plugin.

use std::collections::{BTreeSet, HashMap, HashSet};

use subsites_sdk::{Group, GroupId, Member, MemberId, Subsite, SubsiteId, SubsitesError};

use crate::config::StaticSubsitesPluginConfig;

/// Static subsites service.
///
/// Holds subsites, groups and member capabilities in memory, loaded once
/// from configuration.
#[derive(Debug)]
pub struct Service {
    /// Subsites in configuration order.
    pub(super) subsites: Vec<Subsite>,

    /// Groups by ID.
    pub(super) groups: HashMap<GroupId, Group>,

    /// Group memberships by member ID.
    pub(super) memberships: HashMap<MemberId, Vec<GroupId>>,

    /// Capabilities by member ID.
    pub(super) capabilities: HashMap<MemberId, HashSet<String>>,
}

impl Service {
    /// Creates a new service from configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if more than one subsite is marked default, an id
    ///   is used twice, or a group or member references something unknown
    pub fn from_config(cfg: &StaticSubsitesPluginConfig) -> Result<Self, SubsitesError> {
        let subsites = Self::load_subsites(cfg)?;
        let known: HashSet<SubsiteId> = subsites.iter().map(|s| s.id).collect();

        let mut groups = HashMap::with_capacity(cfg.groups.len());
        for g in &cfg.groups {
            if let Some(unknown) = g.subsite_ids.iter().find(|id| !known.contains(*id)) {
                return Err(SubsitesError::invalid_config(format!(
                    "group {} grants unknown subsite {unknown}",
                    g.id
                )));
            }
            let group = Group {
                id: g.id,
                title: g.title.clone(),
                access_all_subsites: g.access_all_subsites,
                subsite_ids: g.subsite_ids.iter().copied().collect::<BTreeSet<_>>(),
            };
            if groups.insert(g.id, group).is_some() {
                return Err(SubsitesError::invalid_config(format!(
                    "duplicate group id {}",
                    g.id
                )));
            }
        }

        let mut memberships = HashMap::with_capacity(cfg.members.len());
        let mut capabilities = HashMap::with_capacity(cfg.members.len());
        for m in &cfg.members {
            if let Some(unknown) = m.groups.iter().find(|id| !groups.contains_key(*id)) {
                return Err(SubsitesError::invalid_config(format!(
                    "member {} belongs to unknown group {unknown}",
                    m.id
                )));
            }
            if memberships.insert(m.id, m.groups.clone()).is_some() {
                return Err(SubsitesError::invalid_config(format!(
                    "duplicate member id {}",
                    m.id
                )));
            }
            capabilities.insert(m.id, m.capabilities.iter().cloned().collect());
        }

        tracing::debug!(
            subsites = subsites.len(),
            groups = groups.len(),
            members = memberships.len(),
            "Loaded static subsites"
        );

        Ok(Self {
            subsites,
            groups,
            memberships,
            capabilities,
        })
    }

    fn load_subsites(cfg: &StaticSubsitesPluginConfig) -> Result<Vec<Subsite>, SubsitesError> {
        let mut seen = HashSet::with_capacity(cfg.subsites.len());
        let mut default_id: Option<SubsiteId> = None;
        let mut subsites = Vec::with_capacity(cfg.subsites.len());

        for s in &cfg.subsites {
            if !seen.insert(s.id) {
                return Err(SubsitesError::invalid_config(format!(
                    "duplicate subsite id {}",
                    s.id
                )));
            }
            if s.is_default {
                if let Some(previous) = default_id {
                    return Err(SubsitesError::invalid_config(format!(
                        "subsites {previous} and {} are both marked default",
                        s.id
                    )));
                }
                default_id = Some(s.id);
            }
            subsites.push(Subsite {
                id: s.id,
                title: s.title.clone(),
                is_default: s.is_default,
            });
        }

        Ok(subsites)
    }

    /// Resolves a configured member with its groups.
    ///
    /// Returns `None` for members that are not configured.
    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<Member> {
        let group_ids = self.memberships.get(&id)?;
        Some(Member {
            id,
            groups: group_ids
                .iter()
                .filter_map(|g| self.groups.get(g).cloned())
                .collect(),
        })
    }

    /// The subsite marked default, if any.
    #[must_use]
    pub fn default_subsite(&self) -> Option<&Subsite> {
        self.subsites.iter().find(|s| s.is_default)
    }
}
