//! Helpers the admin chrome (menu, tree title, subsite switcher) relies on.

use serde::Serialize;
use subsites_sdk::{MAIN_SITE_ID, Member, SubsiteId, SubsitesError, capabilities};

use super::service::Service;
use super::state::SubsiteState;

/// One entry of the subsite switcher dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitcherEntry {
    pub id: SubsiteId,
    pub title: String,
    pub selected: bool,
}

impl Service {
    /// Title of the admin site tree: the current subsite's title, or the
    /// configured default when the current subsite is not persisted.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn cms_tree_title(&self, state: &SubsiteState) -> Result<String, SubsitesError> {
        Ok(self
            .directory
            .current_subsite(state)?
            .map_or_else(|| self.config.default_tree_title.clone(), |s| s.title))
    }

    /// Entries for the subsite switcher.
    ///
    /// `None` when there is nothing to switch between: no accessible subsite
    /// or just the default one.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn subsite_switcher(
        &self,
        member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<Option<Vec<SwitcherEntry>>, SubsitesError> {
        let accessible = self.accessible_to(member, state)?;
        let only_default = matches!(accessible.as_slice(), [single] if single.is_default);
        if accessible.is_empty() || only_default {
            return Ok(None);
        }

        let current = state.current_id();
        Ok(Some(
            accessible
                .into_iter()
                .map(|s| SwitcherEntry {
                    selected: s.id == current,
                    id: s.id,
                    title: s.title,
                })
                .collect(),
        ))
    }

    /// Whether the named section appears in the menu on the current subsite.
    ///
    /// The main site shows every registered section; other subsites only the
    /// ones flagged for it. Per-member permissions are not checked here.
    #[must_use]
    pub fn alternate_menu_display_check(&self, section: &str, state: &SubsiteState) -> bool {
        let Some(section) = self.registry.get(section) else {
            return false;
        };
        state.current_id() == MAIN_SITE_ID || section.is_shown_in_menu_on_subsites()
    }

    /// Final gate after redirects ran: `false` only on explicit denial.
    ///
    /// # Errors
    ///
    /// - `UnknownSection` if no section has this name
    /// - `Catalog` if the catalog cannot be read
    pub fn alternate_access_check(
        &self,
        section: &str,
        member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<bool, SubsitesError> {
        let section = self.registry.require(section)?;
        Ok(!section.owner().can_access(member, state)?.is_denied())
    }

    /// Only full administrators may create subsites.
    #[must_use]
    pub fn can_add_subsites(&self, member: &Member) -> bool {
        self.evaluator.has_capability(member, capabilities::ADMIN)
    }
}

/// Subsite for a record created in the admin: the posted subsite if one was
/// chosen, else the current one.
#[must_use]
pub fn new_record_subsite_id(posted: Option<SubsiteId>, state: &SubsiteState) -> SubsiteId {
    posted
        .filter(|id| *id != MAIN_SITE_ID)
        .unwrap_or_else(|| state.current_id())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_record_prefers_posted_subsite() {
        let state = SubsiteState::new(3);
        assert_eq!(new_record_subsite_id(Some(5), &state), 5);
        assert_eq!(new_record_subsite_id(None, &state), 3);
        assert_eq!(new_record_subsite_id(Some(MAIN_SITE_ID), &state), 3);
    }
}
