//! Static Subsites Plugin
//!
//! Provides subsites, member groups and capabilities from configuration.
//! Useful for testing, development, and installations whose subsites are
//! fixed at deploy time.
//!
//! ## Configuration
//!
//! ```yaml
//! modules:
//!   static_subsites_plugin:
//!     subsites:
//!       - id: 1
//!         title: "Marketing"
//!     groups:
//!       - id: 10
//!         subsite_ids: [1]
//!     members:
//!       - id: "22222222-2222-2222-2222-222222222222"
//!         groups: [10]
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;


pub use config::StaticSubsitesPluginConfig;
pub use domain::service::Service;
