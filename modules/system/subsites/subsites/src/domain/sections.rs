//! Admin section registry.

use std::fmt;
use std::sync::Arc;

use subsites_sdk::{AccessDecision, Member, RecordRef, SubsiteId, SubsitesError};

use super::evaluator::AccessEvaluator;
use super::state::SubsiteState;
use crate::config::SectionConfig;

/// Access capability every admin section exposes.
pub trait AccessCheckable: Send + Sync {
    /// Tri-state decision for the subsite current in `state`.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying checks (e.g. `Catalog`).
    fn can_access(
        &self,
        member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<AccessDecision, SubsitesError>;

    /// Whether the section can be viewed on the subsite current in `state`.
    ///
    /// Defaults to "not explicitly denied".
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying checks (e.g. `Catalog`).
    fn can_view(&self, member: Option<&Member>, state: &SubsiteState) -> Result<bool, SubsitesError> {
        Ok(!self.can_access(member, state)?.is_denied())
    }
}

/// Section owner backed by the shared [`AccessEvaluator`].
pub struct EvaluatorSection {
    evaluator: Arc<AccessEvaluator>,
}

impl EvaluatorSection {
    #[must_use]
    pub fn new(evaluator: Arc<AccessEvaluator>) -> Self {
        Self { evaluator }
    }
}

impl AccessCheckable for EvaluatorSection {
    fn can_access(
        &self,
        member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<AccessDecision, SubsitesError> {
        self.evaluator.evaluate_current(member, state)
    }
}

/// A registered admin section.
#[derive(Clone)]
pub struct SectionDescriptor {
    name: String,
    url: String,
    page_editing: bool,
    treats_main_site_as_global: bool,
    session_namespace: Option<String>,
    show_in_menu_on_subsites: bool,
    owner: Arc<dyn AccessCheckable>,
}

impl SectionDescriptor {
    #[must_use]
    pub fn new(name: &str, url: &str, owner: Arc<dyn AccessCheckable>) -> Self {
        Self {
            name: name.to_owned(),
            url: url.to_owned(),
            page_editing: false,
            treats_main_site_as_global: false,
            session_namespace: None,
            show_in_menu_on_subsites: false,
            owner,
        }
    }

    #[must_use]
    pub fn from_config(cfg: &SectionConfig, owner: Arc<dyn AccessCheckable>) -> Self {
        Self {
            name: cfg.name.clone(),
            url: cfg.url.clone(),
            page_editing: cfg.page_editing,
            treats_main_site_as_global: cfg.treats_main_site_as_global,
            session_namespace: cfg.session_namespace.clone(),
            show_in_menu_on_subsites: cfg.show_in_menu_on_subsites,
            owner,
        }
    }

    #[must_use]
    pub fn page_editing(mut self) -> Self {
        self.page_editing = true;
        self
    }

    #[must_use]
    pub fn treats_main_site_as_global(mut self) -> Self {
        self.treats_main_site_as_global = true;
        self
    }

    #[must_use]
    pub fn with_session_namespace(mut self, namespace: &str) -> Self {
        self.session_namespace = Some(namespace.to_owned());
        self
    }

    #[must_use]
    pub fn show_in_menu_on_subsites(mut self) -> Self {
        self.show_in_menu_on_subsites = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn is_page_editing(&self) -> bool {
        self.page_editing
    }

    #[must_use]
    pub fn is_shown_in_menu_on_subsites(&self) -> bool {
        self.show_in_menu_on_subsites
    }

    #[must_use]
    pub fn owner(&self) -> &dyn AccessCheckable {
        self.owner.as_ref()
    }

    /// Session namespace; the section name unless overridden.
    #[must_use]
    pub fn session_namespace(&self) -> &str {
        self.session_namespace.as_deref().unwrap_or(&self.name)
    }

    /// Session key caching the record the section last showed.
    #[must_use]
    pub fn current_page_key(&self) -> String {
        format!("{}.currentPage", self.session_namespace())
    }

    /// Whether a record owned by `record_subsite` must move the session to
    /// that subsite before it can be shown while `current` is active.
    #[must_use]
    pub fn should_change_subsite(&self, record_subsite: SubsiteId, current: SubsiteId) -> bool {
        if self.treats_main_site_as_global && record_subsite == subsites_sdk::MAIN_SITE_ID {
            return false;
        }
        record_subsite != current
    }

    /// Link showing `record` with a switch to `subsite_id` on the next request.
    #[must_use]
    pub fn show_record_link(
        &self,
        record: &RecordRef,
        switch_param: &str,
        subsite_id: SubsiteId,
    ) -> String {
        format!(
            "{}/show/{}?{switch_param}={subsite_id}",
            self.url.trim_end_matches('/'),
            record.id
        )
    }
}

impl fmt::Debug for SectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionDescriptor")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("page_editing", &self.page_editing)
            .field("treats_main_site_as_global", &self.treats_main_site_as_global)
            .field("session_namespace", &self.session_namespace)
            .field("show_in_menu_on_subsites", &self.show_in_menu_on_subsites)
            .finish_non_exhaustive()
    }
}

/// Admin sections in registration (menu) order.
#[derive(Debug, Default)]
pub struct SectionRegistry {
    sections: Vec<SectionDescriptor>,
}

impl SectionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every configured section with the same owner.
    ///
    /// # Errors
    ///
    /// - `DuplicateSection` if two sections share a name
    pub fn from_config(
        sections: &[SectionConfig],
        owner: &Arc<dyn AccessCheckable>,
    ) -> Result<Self, SubsitesError> {
        let mut registry = Self::new();
        for cfg in sections {
            registry.register(SectionDescriptor::from_config(cfg, Arc::clone(owner)))?;
        }
        Ok(registry)
    }

    /// Appends a section.
    ///
    /// # Errors
    ///
    /// - `DuplicateSection` if the name is already registered
    pub fn register(&mut self, section: SectionDescriptor) -> Result<(), SubsitesError> {
        if self.get(section.name()).is_some() {
            return Err(SubsitesError::DuplicateSection {
                name: section.name,
            });
        }
        self.sections.push(section);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// # Errors
    ///
    /// - `UnknownSection` if no section has this name
    pub fn require(&self, name: &str) -> Result<&SectionDescriptor, SubsitesError> {
        self.get(name).ok_or_else(|| SubsitesError::UnknownSection {
            name: name.to_owned(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionDescriptor> {
        self.sections.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
