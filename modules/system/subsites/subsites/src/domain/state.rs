//! Request-scoped current-subsite state.

use std::cell::Cell;

use serde_json::Value;
use subsites_sdk::{MAIN_SITE_ID, SessionStore, SubsiteId};
use tracing::debug;

/// Session key holding the persisted current subsite.
pub const SESSION_SUBSITE_KEY: &str = "SubsiteID";

/// The current subsite of one admin request.
///
/// Uses interior mutability so that probes can run while evaluators hold
/// shared references. The type is `!Sync`: one instance belongs to one
/// request and cannot be shared between concurrently running requests.
#[derive(Debug)]
pub struct SubsiteState {
    current: Cell<SubsiteId>,
    changed: Cell<bool>,
    persist: Cell<bool>,
}

impl Default for SubsiteState {
    fn default() -> Self {
        Self::new(MAIN_SITE_ID)
    }
}

impl SubsiteState {
    #[must_use]
    pub fn new(initial: SubsiteId) -> Self {
        Self {
            current: Cell::new(initial),
            changed: Cell::new(false),
            persist: Cell::new(false),
        }
    }

    /// Seeds the state from the session and applies an explicit switch
    /// signal carried by the request.
    ///
    /// A switch signal is a persistent change; it marks the request as
    /// changed when it differs from the session value.
    #[must_use]
    pub fn initialize(session: &dyn SessionStore, switch_signal: Option<SubsiteId>) -> Self {
        let stored = session
            .get(SESSION_SUBSITE_KEY)
            .and_then(|v| v.as_u64())
            .unwrap_or(MAIN_SITE_ID);

        let state = Self::new(stored);
        if let Some(requested) = switch_signal {
            state.change_subsite(requested);
        }
        state
    }

    #[must_use]
    pub fn current_id(&self) -> SubsiteId {
        self.current.get()
    }

    /// Makes `id` current for the rest of the request.
    pub fn set_current_id(&self, id: SubsiteId) {
        if id != self.current.get() {
            self.changed.set(true);
        }
        self.current.set(id);
    }

    #[must_use]
    pub fn was_changed_this_request(&self) -> bool {
        self.changed.get()
    }

    /// Switches to `id` and marks the switch to survive the request.
    pub fn change_subsite(&self, id: SubsiteId) {
        self.set_current_id(id);
        self.persist.set(true);
    }

    /// The subsite to write back at request end, if a persistent switch happened.
    #[must_use]
    pub fn pending_persist(&self) -> Option<SubsiteId> {
        self.persist.get().then_some(self.current.get())
    }

    /// Writes a persistent switch back to the session.
    ///
    /// Returns `true` if the session was updated.
    pub fn persist(&self, session: &dyn SessionStore) -> bool {
        let Some(id) = self.pending_persist() else {
            return false;
        };
        session.set(SESSION_SUBSITE_KEY, Value::from(id));
        self.persist.set(false);
        debug!(subsite.id = id, "Persisted current subsite to session");
        true
    }

    /// Runs `f` with `subsite_id` temporarily current.
    ///
    /// The previous state is restored when `f` returns, when it returns an
    /// error, and when it unwinds. Probes nest; each level restores the
    /// value it saw on entry. Nothing done inside a probe is persisted.
    pub fn probe<T>(&self, subsite_id: SubsiteId, f: impl FnOnce(&Self) -> T) -> T {
        let _guard = ProbeGuard::enter(self, subsite_id);
        f(self)
    }
}

/// Restores the saved state on drop.
struct ProbeGuard<'a> {
    state: &'a SubsiteState,
    saved_id: SubsiteId,
    saved_changed: bool,
    saved_persist: bool,
}

impl<'a> ProbeGuard<'a> {
    fn enter(state: &'a SubsiteState, subsite_id: SubsiteId) -> Self {
        let guard = Self {
            state,
            saved_id: state.current.get(),
            saved_changed: state.changed.get(),
            saved_persist: state.persist.get(),
        };
        state.current.set(subsite_id);
        guard
    }
}

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        self.state.current.set(self.saved_id);
        self.state.changed.set(self.saved_changed);
        self.state.persist.set(self.saved_persist);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;
    use crate::infra::session::InMemorySessionStore;

    #[test]
    fn defaults_to_main_site() {
        let state = SubsiteState::default();
        assert_eq!(state.current_id(), MAIN_SITE_ID);
        assert!(!state.was_changed_this_request());
        assert_eq!(state.pending_persist(), None);
    }

    #[test]
    fn set_current_id_flags_change_only_when_different() {
        let state = SubsiteState::new(3);
        state.set_current_id(3);
        assert!(!state.was_changed_this_request());

        state.set_current_id(4);
        assert!(state.was_changed_this_request());
        assert_eq!(state.current_id(), 4);
        assert_eq!(state.pending_persist(), None);
    }

    #[test]
    fn probe_restores_previous_id() {
        let state = SubsiteState::new(1);
        let seen = state.probe(2, SubsiteState::current_id);
        assert_eq!(seen, 2);
        assert_eq!(state.current_id(), 1);
        assert!(!state.was_changed_this_request());
    }

    #[test]
    fn probe_restores_after_error() {
        let state = SubsiteState::new(1);
        let result: Result<(), &str> = state.probe(9, |_| Err("evaluation failed"));
        assert_eq!(result, Err("evaluation failed"));
        assert_eq!(state.current_id(), 1);
    }

    #[test]
    fn probe_restores_after_panic() {
        let state = SubsiteState::new(1);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            state.probe::<()>(9, |_| panic!("evaluator blew up"));
        }));
        assert!(outcome.is_err());
        assert_eq!(state.current_id(), 1);
    }

    #[test]
    fn nested_probes_restore_in_lifo_order() {
        let state = SubsiteState::new(1);
        let (outer_before, inner, outer_after) = state.probe(2, |s| {
            let before = s.current_id();
            let inner = s.probe(3, SubsiteState::current_id);
            (before, inner, s.current_id())
        });
        assert_eq!(outer_before, 2);
        assert_eq!(inner, 3);
        assert_eq!(outer_after, 2);
        assert_eq!(state.current_id(), 1);
    }

    #[test]
    fn changes_inside_probe_do_not_leak() {
        let state = SubsiteState::new(1);
        state.probe(2, |s| s.change_subsite(7));
        assert_eq!(state.current_id(), 1);
        assert!(!state.was_changed_this_request());
        assert_eq!(state.pending_persist(), None);
    }

    #[test]
    fn initialize_reads_session_value() {
        let session = InMemorySessionStore::new();
        session.set(SESSION_SUBSITE_KEY, Value::from(4_u64));

        let state = SubsiteState::initialize(&session, None);
        assert_eq!(state.current_id(), 4);
        assert!(!state.was_changed_this_request());
    }

    #[test]
    fn initialize_applies_switch_signal() {
        let session = InMemorySessionStore::new();
        session.set(SESSION_SUBSITE_KEY, Value::from(4_u64));

        let state = SubsiteState::initialize(&session, Some(7));
        assert_eq!(state.current_id(), 7);
        assert!(state.was_changed_this_request());
        assert_eq!(state.pending_persist(), Some(7));

        assert!(state.persist(&session));
        assert_eq!(session.get(SESSION_SUBSITE_KEY), Some(Value::from(7_u64)));
        assert!(!state.persist(&session));
    }

    #[test]
    fn switch_signal_to_same_subsite_is_not_a_change() {
        let session = InMemorySessionStore::new();
        session.set(SESSION_SUBSITE_KEY, Value::from(4_u64));

        let state = SubsiteState::initialize(&session, Some(4));
        assert!(!state.was_changed_this_request());
        assert_eq!(state.pending_persist(), Some(4));
    }
}
