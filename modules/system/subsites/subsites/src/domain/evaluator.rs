//! Tri-state subsite access evaluation.

use std::sync::Arc;

use subsites_sdk::{AccessDecision, Member, PermissionOracle, SubsiteId, SubsitesError};
use tracing::trace;

use super::directory::SubsiteDirectory;
use super::state::SubsiteState;
use crate::config::SubsitesConfig;

/// Decides whether a member may work on a subsite.
pub struct AccessEvaluator {
    directory: Arc<SubsiteDirectory>,
    oracle: Arc<dyn PermissionOracle>,
    bypass_capabilities: Vec<String>,
}

impl AccessEvaluator {
    #[must_use]
    pub fn new(
        directory: Arc<SubsiteDirectory>,
        oracle: Arc<dyn PermissionOracle>,
        config: &SubsitesConfig,
    ) -> Self {
        Self {
            directory,
            oracle,
            bypass_capabilities: config.bypass_capabilities.clone(),
        }
    }

    /// Evaluates `member` against `subsite_id`.
    ///
    /// Rules, first match wins:
    /// 1. no member: `Delegate`
    /// 2. member holds a bypass capability: `Allow`
    /// 3. no subsites persisted: `Delegate`
    /// 4. a group grants all subsites or `subsite_id`: `Allow`, else `Deny`
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn evaluate(
        &self,
        member: Option<&Member>,
        subsite_id: SubsiteId,
    ) -> Result<AccessDecision, SubsitesError> {
        let Some(member) = member else {
            return Ok(AccessDecision::Delegate);
        };

        if self.is_superuser(member) {
            return Ok(AccessDecision::Allow);
        }

        if !self.directory.exists()? {
            return Ok(AccessDecision::Delegate);
        }

        let decision = if member.groups.iter().any(|g| g.grants(subsite_id)) {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny
        };
        trace!(member.id = %member.id, subsite.id = subsite_id, ?decision, "Evaluated subsite access");
        Ok(decision)
    }

    /// Evaluates against the subsite that is current in `state`.
    ///
    /// Use [`SubsiteState::probe`] to evaluate a different subsite.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the catalog cannot be read
    pub fn evaluate_current(
        &self,
        member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<AccessDecision, SubsitesError> {
        self.evaluate(member, state.current_id())
    }

    /// Member holds one of the capabilities granting every subsite.
    #[must_use]
    pub fn is_superuser(&self, member: &Member) -> bool {
        self.bypass_capabilities
            .iter()
            .any(|cap| self.oracle.has_capability(member, cap))
    }

    #[must_use]
    pub fn has_capability(&self, member: &Member, capability: &str) -> bool {
        self.oracle.has_capability(member, capability)
    }
}
