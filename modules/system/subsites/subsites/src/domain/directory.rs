//! Enumeration of the known subsites.

use std::sync::Arc;

use subsites_sdk::{MAIN_SITE_ID, Member, Subsite, SubsiteCatalog, SubsiteId, SubsitesError};

use super::evaluator::AccessEvaluator;
use super::state::SubsiteState;

/// Read-only view over the subsite catalog.
pub struct SubsiteDirectory {
    catalog: Arc<dyn SubsiteCatalog>,
}

impl SubsiteDirectory {
    #[must_use]
    pub fn new(catalog: Arc<dyn SubsiteCatalog>) -> Self {
        Self { catalog }
    }

    /// All subsites in catalog order.
    ///
    /// With `include_main`, a synthetic main-site entry titled `main_title`
    /// is prepended unless the catalog already holds a subsite with id `0`.
    /// The entry is default only when no persisted subsite is.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn list_all(
        &self,
        include_main: bool,
        main_title: &str,
    ) -> Result<Vec<Subsite>, SubsitesError> {
        let persisted = self.catalog.subsites()?;
        if !include_main || persisted.iter().any(|s| s.id == MAIN_SITE_ID) {
            return Ok(persisted);
        }

        let mut main = Subsite::main_site(main_title);
        main.is_default = !persisted.iter().any(|s| s.is_default);

        let mut all = Vec::with_capacity(persisted.len() + 1);
        all.push(main);
        all.extend(persisted);
        Ok(all)
    }

    /// Whether any subsite is persisted.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn exists(&self) -> Result<bool, SubsitesError> {
        self.catalog.exists()
    }

    /// Looks up a persisted subsite.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn get(&self, id: SubsiteId) -> Result<Option<Subsite>, SubsitesError> {
        Ok(self.catalog.subsites()?.into_iter().find(|s| s.id == id))
    }

    /// The persisted subsite that is current in `state`, if any.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn current_subsite(&self, state: &SubsiteState) -> Result<Option<Subsite>, SubsitesError> {
        self.get(state.current_id())
    }

    /// Subsites (main site included) that `member` is not explicitly denied.
    /// Without a member nothing is listed.
    ///
    /// Each subsite is checked by probing it into `state`, so `state` is
    /// unchanged on return.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn list_accessible_to(
        &self,
        evaluator: &AccessEvaluator,
        member: Option<&Member>,
        state: &SubsiteState,
        main_title: &str,
    ) -> Result<Vec<Subsite>, SubsitesError> {
        if member.is_none() {
            return Ok(Vec::new());
        }

        let mut accessible = Vec::new();
        for subsite in self.list_all(true, main_title)? {
            let decision = state.probe(subsite.id, |probed| {
                evaluator.evaluate_current(member, probed)
            })?;
            if decision.is_denied() {
                continue;
            }
            accessible.push(subsite);
        }
        Ok(accessible)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    struct FixedCatalog(Vec<Subsite>);

    impl SubsiteCatalog for FixedCatalog {
        fn subsites(&self) -> Result<Vec<Subsite>, SubsitesError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenCatalog;

    impl SubsiteCatalog for BrokenCatalog {
        fn subsites(&self) -> Result<Vec<Subsite>, SubsitesError> {
            Err(SubsitesError::catalog("connection refused"))
        }
    }

    fn subsite(id: SubsiteId, title: &str) -> Subsite {
        Subsite {
            id,
            title: title.to_owned(),
            is_default: false,
        }
    }

    fn directory(subsites: Vec<Subsite>) -> SubsiteDirectory {
        SubsiteDirectory::new(Arc::new(FixedCatalog(subsites)))
    }

    #[test]
    fn list_all_without_main_returns_catalog_order() {
        let dir = directory(vec![subsite(5, "Five"), subsite(2, "Two")]);
        let ids: Vec<_> = dir
            .list_all(false, "Main site")
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![5, 2]);
    }

    #[test]
    fn list_all_prepends_main_site() {
        let dir = directory(vec![subsite(5, "Five")]);
        let all = dir.list_all(true, "Headquarters").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], Subsite::main_site("Headquarters"));
        assert_eq!(all[1].id, 5);
    }

    #[test]
    fn list_all_keeps_persisted_main_site() {
        let dir = directory(vec![subsite(MAIN_SITE_ID, "Persisted main"), subsite(5, "Five")]);
        let all = dir.list_all(true, "Main site").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "Persisted main");
    }

    #[test]
    fn main_site_is_not_default_next_to_persisted_default() {
        let dir = directory(vec![
            Subsite {
                is_default: true,
                ..subsite(1, "Marketing")
            },
            subsite(2, "Support"),
        ]);
        let all = dir.list_all(true, "Main site").unwrap();
        let defaults: Vec<_> = all.iter().filter(|s| s.is_default).map(|s| s.id).collect();
        assert_eq!(defaults, vec![1]);
        assert_eq!(all[0].id, MAIN_SITE_ID);
    }

    #[test]
    fn empty_catalog_is_not_an_error() {
        let dir = directory(Vec::new());
        assert!(dir.list_all(false, "Main site").unwrap().is_empty());
        assert!(!dir.exists().unwrap());
        assert_eq!(dir.list_all(true, "Main site").unwrap().len(), 1);
    }

    #[test]
    fn current_subsite_follows_state() {
        let dir = directory(vec![subsite(5, "Five")]);
        assert_eq!(
            dir.current_subsite(&SubsiteState::new(5)).unwrap().map(|s| s.title),
            Some("Five".to_owned())
        );
        assert!(dir.current_subsite(&SubsiteState::new(6)).unwrap().is_none());
    }

    #[test]
    fn catalog_failure_propagates() {
        let dir = SubsiteDirectory::new(Arc::new(BrokenCatalog));
        let err = dir.list_all(true, "Main site").unwrap_err();
        assert!(matches!(err, SubsitesError::Catalog(_)));
    }
}
