//! Collaborator implementations for the static subsites plugin.
//!
//! Implements `SubsiteCatalog` and `PermissionOracle` using the domain service.

use subsites_sdk::{Member, PermissionOracle, Subsite, SubsiteCatalog, SubsitesError};

use super::service::Service;

impl SubsiteCatalog for Service {
    fn subsites(&self) -> Result<Vec<Subsite>, SubsitesError> {
        Ok(self.subsites.clone())
    }

    fn exists(&self) -> Result<bool, SubsitesError> {
        Ok(!self.subsites.is_empty())
    }
}

impl PermissionOracle for Service {
    fn has_capability(&self, member: &Member, capability: &str) -> bool {
        self.capabilities
            .get(&member.id)
            .is_some_and(|caps| caps.contains(capability))
    }
}
