//! Subsites
//!
//! Lets one admin installation host several subsites (tenants) that share
//! members, groups and permissions. This crate decides, per admin request:
//!
//! - which subsite is current ([`SubsiteState`])
//! - whether the member may work on it ([`AccessEvaluator`], tri-state)
//! - on which subsites each admin section is usable ([`SectionVisibility`])
//! - whether the request proceeds, is redirected, or is denied
//!   ([`RedirectResolver`])
//!
//! ## Configuration
//!
//! ```yaml
//! modules:
//!   subsites:
//!     admin_url_base: "admin"
//!     pages_section: "pages"
//!     sections:
//!       - name: "pages"
//!         url: "admin/pages"
//!         show_in_menu_on_subsites: true
//!       - name: "page-edit"
//!         url: "admin/pages/edit"
//!         page_editing: true
//!       - name: "assets"
//!         url: "admin/assets"
//!         treats_main_site_as_global: true
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod infra;

#[cfg(test)]
mod config_tests;

pub use config::{SectionConfig, SubsitesConfig};
pub use domain::chrome::{SwitcherEntry, new_record_subsite_id};
pub use domain::directory::SubsiteDirectory;
pub use domain::evaluator::AccessEvaluator;
pub use domain::request::{AdminRequest, RequestContext};
pub use domain::resolver::{RedirectResolver, Resolution};
pub use domain::sections::{AccessCheckable, EvaluatorSection, SectionDescriptor, SectionRegistry};
pub use domain::service::Service;
pub use domain::state::{SESSION_SUBSITE_KEY, SubsiteState};
pub use domain::visibility::SectionVisibility;
pub use infra::session::InMemorySessionStore;
