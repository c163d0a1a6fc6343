//! Configuration for the subsites module.

use serde::{Deserialize, Serialize};
use subsites_sdk::capabilities;

/// Module configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubsitesConfig {
    /// Base path of the admin interface; the landing root is `<base>/`.
    pub admin_url_base: String,

    /// Name of the section listing pages. Page-editing sections redirect
    /// there when the edited page belongs to another subsite.
    pub pages_section: String,

    /// Title of the synthetic main-site entry.
    pub main_site_title: String,

    /// Admin tree title used when the current subsite is not persisted.
    pub default_tree_title: String,

    /// Query parameter carrying the subsite switch signal.
    pub switch_param: String,

    /// Capabilities that grant access to every subsite.
    pub bypass_capabilities: Vec<String>,

    /// Admin sections, in menu order.
    pub sections: Vec<SectionConfig>,
}

impl Default for SubsitesConfig {
    fn default() -> Self {
        Self {
            admin_url_base: "admin".to_owned(),
            pages_section: "pages".to_owned(),
            main_site_title: "Main site".to_owned(),
            default_tree_title: "Site Content".to_owned(),
            switch_param: "SubsiteID".to_owned(),
            bypass_capabilities: vec![
                capabilities::ADMIN.to_owned(),
                capabilities::CMS_ACCESS_ALL.to_owned(),
            ],
            sections: Vec::new(),
        }
    }
}

impl SubsitesConfig {
    /// Landing URL of the admin interface.
    #[must_use]
    pub fn admin_root_url(&self) -> String {
        format!("{}/", self.admin_url_base.trim_end_matches('/'))
    }
}

/// Configuration for a single admin section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    pub name: String,

    pub url: String,

    /// The section edits a single page (record) at a time.
    #[serde(default)]
    pub page_editing: bool,

    /// Records with subsite `0` are global in this section and never force
    /// a subsite switch.
    #[serde(default)]
    pub treats_main_site_as_global: bool,

    /// Session namespace override. Defaults to the section name.
    #[serde(default)]
    pub session_namespace: Option<String>,

    /// Show this section in the menu while a non-main subsite is current.
    #[serde(default)]
    pub show_in_menu_on_subsites: bool,
}
