//! Domain service wiring the subsites components together.

use std::sync::Arc;

use subsites_sdk::{
    AccessDecision, Member, PermissionOracle, SessionStore, Subsite, SubsiteCatalog, SubsiteId,
    SubsitesError,
};

use super::directory::SubsiteDirectory;
use super::evaluator::AccessEvaluator;
use super::request::{AdminRequest, RequestContext};
use super::resolver::{RedirectResolver, Resolution};
use super::sections::{AccessCheckable, EvaluatorSection, SectionRegistry};
use super::state::SubsiteState;
use super::visibility::SectionVisibility;
use crate::config::SubsitesConfig;

/// Subsites service.
///
/// Built once at startup; every request gets its own [`SubsiteState`] from
/// [`Service::begin_request`].
pub struct Service {
    pub(super) config: Arc<SubsitesConfig>,
    pub(super) directory: Arc<SubsiteDirectory>,
    pub(super) evaluator: Arc<AccessEvaluator>,
    pub(super) visibility: SectionVisibility,
    pub(super) registry: Arc<SectionRegistry>,
    resolver: RedirectResolver,
}

impl Service {
    /// Creates the service with the configured sections, all backed by the
    /// shared evaluator.
    ///
    /// # Errors
    ///
    /// - `DuplicateSection` if the configuration names a section twice
    pub fn new(
        config: SubsitesConfig,
        catalog: Arc<dyn SubsiteCatalog>,
        oracle: Arc<dyn PermissionOracle>,
    ) -> Result<Self, SubsitesError> {
        Self::with_sections(config, catalog, oracle, |_, _| Ok(()))
    }

    /// Like [`Service::new`], then lets `extend` register further sections
    /// (e.g. with custom owners) after the configured ones.
    ///
    /// # Errors
    ///
    /// - `DuplicateSection` if a section name is registered twice
    /// - any error returned by `extend`
    pub fn with_sections<F>(
        config: SubsitesConfig,
        catalog: Arc<dyn SubsiteCatalog>,
        oracle: Arc<dyn PermissionOracle>,
        extend: F,
    ) -> Result<Self, SubsitesError>
    where
        F: FnOnce(&Arc<AccessEvaluator>, &mut SectionRegistry) -> Result<(), SubsitesError>,
    {
        let config = Arc::new(config);
        let directory = Arc::new(SubsiteDirectory::new(catalog));
        let evaluator = Arc::new(AccessEvaluator::new(
            Arc::clone(&directory),
            oracle,
            &config,
        ));

        let default_owner: Arc<dyn AccessCheckable> =
            Arc::new(EvaluatorSection::new(Arc::clone(&evaluator)));
        let mut registry = SectionRegistry::from_config(&config.sections, &default_owner)?;
        extend(&evaluator, &mut registry)?;
        let registry = Arc::new(registry);

        let visibility = SectionVisibility::new(Arc::clone(&directory));
        let resolver = RedirectResolver::new(
            Arc::clone(&config),
            Arc::clone(&registry),
            visibility.clone(),
        );

        tracing::debug!(sections = registry.len(), "Subsites service initialized");

        Ok(Self {
            config,
            directory,
            evaluator,
            visibility,
            registry,
            resolver,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SubsitesConfig {
        &self.config
    }

    #[must_use]
    pub fn directory(&self) -> &SubsiteDirectory {
        &self.directory
    }

    #[must_use]
    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    #[must_use]
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Parses `url` into an [`AdminRequest`] using the configured switch parameter.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the query string is malformed
    pub fn parse_request(&self, url: &str) -> Result<AdminRequest, SubsitesError> {
        AdminRequest::parse(url, &self.config.switch_param)
    }

    /// Parses `url` and creates the request's [`SubsiteState`], seeded from
    /// the session and the URL's switch signal.
    ///
    /// Call [`SubsiteState::persist`] at request end to keep a persistent
    /// switch for the following requests.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the query string is malformed
    pub fn begin_request(
        &self,
        session: &dyn SessionStore,
        url: &str,
    ) -> Result<(AdminRequest, SubsiteState), SubsitesError> {
        let request = self.parse_request(url)?;
        let state = SubsiteState::initialize(session, request.switch_signal());
        Ok((request, state))
    }

    /// See [`RedirectResolver::resolve`].
    ///
    /// # Errors
    ///
    /// - `UnknownSection` if the serving section is not registered
    /// - `Catalog` if the catalog cannot be read
    pub fn resolve(
        &self,
        request: &RequestContext,
        member: Option<&Member>,
        state: &SubsiteState,
        session: &dyn SessionStore,
    ) -> Result<Resolution, SubsitesError> {
        self.resolver.resolve(request, member, state, session)
    }

    /// See [`AccessEvaluator::evaluate`].
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn evaluate(
        &self,
        member: Option<&Member>,
        subsite_id: SubsiteId,
    ) -> Result<AccessDecision, SubsitesError> {
        self.evaluator.evaluate(member, subsite_id)
    }

    /// Subsites (main site included) on which the named section is not
    /// explicitly denied to `member`.
    ///
    /// # Errors
    ///
    /// - `UnknownSection` if no section has this name
    /// - `Catalog` if the catalog cannot be read
    pub fn accessible_subsites(
        &self,
        section: &str,
        member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<Vec<Subsite>, SubsitesError> {
        let section = self.registry.require(section)?;
        self.visibility.accessible_subsites(
            section.owner(),
            member,
            state,
            true,
            &self.config.main_site_title,
        )
    }

    /// Subsites `member` is not explicitly denied by the evaluator.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn accessible_to(
        &self,
        member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<Vec<Subsite>, SubsitesError> {
        self.directory.list_accessible_to(
            &self.evaluator,
            member,
            state,
            &self.config.main_site_title,
        )
    }
}
