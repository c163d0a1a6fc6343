//! Per-section subsite visibility.

use std::sync::Arc;

use subsites_sdk::{Member, Subsite, SubsitesError};

use super::directory::SubsiteDirectory;
use super::sections::AccessCheckable;
use super::state::SubsiteState;

/// Computes on which subsites a section is usable for a member.
#[derive(Clone)]
pub struct SectionVisibility {
    directory: Arc<SubsiteDirectory>,
}

impl SectionVisibility {
    #[must_use]
    pub fn new(directory: Arc<SubsiteDirectory>) -> Self {
        Self { directory }
    }

    /// Subsites on which `owner` does not explicitly deny `member`.
    ///
    /// `Allow` and `Delegate` both count as accessible. Order follows
    /// [`SubsiteDirectory::list_all`]. Without a member nothing is listed.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    /// - any error returned by `owner`, after `state` has been restored
    pub fn accessible_subsites(
        &self,
        owner: &dyn AccessCheckable,
        member: Option<&Member>,
        state: &SubsiteState,
        include_main: bool,
        main_title: &str,
    ) -> Result<Vec<Subsite>, SubsitesError> {
        let Some(member) = member else {
            return Ok(Vec::new());
        };

        let mut accessible = Vec::new();
        for subsite in self.directory.list_all(include_main, main_title)? {
            let decision =
                state.probe(subsite.id, |probed| owner.can_access(Some(member), probed))?;
            if decision.is_denied() {
                continue;
            }
            accessible.push(subsite);
        }
        Ok(accessible)
    }
}
