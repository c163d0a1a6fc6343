//! Request-level redirect resolution.
//!
//! Runs once per admin request, before the section handles it, and keeps the
//! session on a subsite and section the member may actually use. URL-driven
//! switches are settled first so that a stale switch signal can never loop
//! through the denial fallback.

use std::sync::Arc;

use subsites_sdk::{MAIN_SITE_ID, Member, SessionStore, Subsite, SubsitesError};
use tracing::{debug, info, warn};

use super::request::RequestContext;
use super::sections::{SectionDescriptor, SectionRegistry};
use super::state::SubsiteState;
use super::visibility::SectionVisibility;
use crate::config::SubsitesConfig;

/// Outcome of [`RedirectResolver::resolve`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Handle the request normally.
    Proceed,
    /// Send the browser to this URL instead.
    Redirect(String),
    /// Nothing is accessible; show the permission failure page.
    Denied,
}

pub struct RedirectResolver {
    config: Arc<SubsitesConfig>,
    registry: Arc<SectionRegistry>,
    visibility: SectionVisibility,
}

impl RedirectResolver {
    #[must_use]
    pub fn new(
        config: Arc<SubsitesConfig>,
        registry: Arc<SectionRegistry>,
        visibility: SectionVisibility,
    ) -> Self {
        Self {
            config,
            registry,
            visibility,
        }
    }

    /// Decides how the request continues.
    ///
    /// Expects `state` to already reflect the request's switch signal
    /// (see [`SubsiteState::initialize`]). The only mutations are clearing
    /// the section's cached record after a switch and, when falling back to
    /// another subsite, a persistent [`SubsiteState::change_subsite`].
    ///
    /// # Errors
    ///
    /// - `UnknownSection` if the serving section (or the pages section, when
    ///   needed) is not registered
    /// - `Catalog` if the catalog cannot be read
    #[tracing::instrument(
        skip_all,
        fields(section = %request.section(), subsite.id = state.current_id())
    )]
    pub fn resolve(
        &self,
        request: &RequestContext,
        member: Option<&Member>,
        state: &SubsiteState,
        session: &dyn SessionStore,
    ) -> Result<Resolution, SubsitesError> {
        let section = self.registry.require(request.section())?;

        if request.switch_requested() {
            return self.settle_switch(section, request, member, state, session);
        }

        if let Some(resolution) = self.follow_record(section, request, member, state)? {
            return Ok(resolution);
        }

        if section.owner().can_access(member, state)?.is_denied() {
            return self.find_fallback(section, member, state);
        }

        Ok(Resolution::Proceed)
    }

    fn settle_switch(
        &self,
        section: &SectionDescriptor,
        request: &RequestContext,
        member: Option<&Member>,
        state: &SubsiteState,
        session: &dyn SessionStore,
    ) -> Result<Resolution, SubsitesError> {
        if state.was_changed_this_request() {
            let key = section.current_page_key();
            session.clear(&key);
            debug!(session.key = %key, "Cleared cached record after subsite switch");
        }

        if !section.owner().can_view(member, state)? {
            debug!("Section not viewable on the requested subsite");
            return Ok(self.admin_root());
        }

        if !section.is_page_editing() {
            return Ok(Resolution::Redirect(request.url().to_owned()));
        }

        let requested = request
            .switch_signal()
            .unwrap_or_else(|| state.current_id());
        if let Some(page) = request.current_record()
            && page.subsite_id.unwrap_or(MAIN_SITE_ID) != requested
        {
            debug!(page.id = page.id, "Edited page belongs to another subsite");
            let pages = self.registry.require(&self.config.pages_section)?;
            return Ok(Resolution::Redirect(pages.url().to_owned()));
        }

        Ok(Resolution::Redirect(request.url_without_signal().to_owned()))
    }

    fn follow_record(
        &self,
        section: &SectionDescriptor,
        request: &RequestContext,
        member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<Option<Resolution>, SubsitesError> {
        let Some(record) = request.addressed_record() else {
            return Ok(None);
        };
        let Some(record_subsite) = record.subsite_id else {
            return Ok(None);
        };
        if !section.should_change_subsite(record_subsite, state.current_id()) {
            return Ok(None);
        }

        let can_view_elsewhere =
            state.probe(record_subsite, |probed| section.owner().can_view(member, probed))?;
        if can_view_elsewhere {
            debug!(
                record.id = record.id,
                record.subsite_id = record_subsite,
                "Moving session to the record's subsite"
            );
            return Ok(Some(Resolution::Redirect(section.show_record_link(
                record,
                &self.config.switch_param,
                record_subsite,
            ))));
        }

        debug!(record.id = record.id, "Record's subsite is not viewable");
        Ok(Some(self.admin_root()))
    }

    // Stays on the current subsite if another section allows it, otherwise
    // adopts the first subsite any section allows.
    // TODO: split the persistent switch out of this lookup once hosts can
    // apply it themselves from the resolution.
    fn find_fallback(
        &self,
        section: &SectionDescriptor,
        member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<Resolution, SubsitesError> {
        let current = state.current_id();

        for candidate in self.registry.iter().filter(|c| c.name() != section.name()) {
            let sites = self.accessible(candidate, member, state)?;
            if sites.iter().any(|s| s.id == current) {
                debug!(candidate = candidate.name(), "Same subsite, other section");
                return Ok(Resolution::Redirect(candidate.url().to_owned()));
            }
        }

        for candidate in self.registry.iter() {
            let sites = self.accessible(candidate, member, state)?;
            if let Some(first) = sites.first() {
                info!(
                    candidate = candidate.name(),
                    subsite.id = first.id,
                    "Switching to first accessible subsite"
                );
                state.change_subsite(first.id);
                return Ok(Resolution::Redirect(candidate.url().to_owned()));
            }
        }

        warn!("No accessible section or subsite");
        Ok(Resolution::Denied)
    }

    fn accessible(
        &self,
        candidate: &SectionDescriptor,
        member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<Vec<Subsite>, SubsitesError> {
        self.visibility.accessible_subsites(
            candidate.owner(),
            member,
            state,
            true,
            &self.config.main_site_title,
        )
    }

    fn admin_root(&self) -> Resolution {
        Resolution::Redirect(self.config.admin_root_url())
    }
}
