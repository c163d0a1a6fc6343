#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common fixtures for subsites integration tests

use std::sync::Arc;

use serde_json::Value;
use static_subsites_plugin::StaticSubsitesPluginConfig;
use static_subsites_plugin::config::{GroupConfig, MemberConfig, SubsiteConfig};
use subsites::{
    AccessCheckable, InMemorySessionStore, SESSION_SUBSITE_KEY, SectionConfig, SectionDescriptor,
    Service, SubsiteState, SubsitesConfig,
};
use subsites_sdk::{
    AccessDecision, Member, PermissionOracle, SessionStore, SubsiteCatalog, SubsiteId,
    SubsitesError, capabilities,
};
use uuid::Uuid;

/// Holds the `ADMIN` capability.
pub const ADMIN: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";
/// Member of the Marketing editors group (subsite 1).
pub const EDITOR: &str = "11111111-1111-1111-1111-111111111111";
/// Member of both editor groups (subsites 1 and 2).
pub const MULTI: &str = "22222222-2222-2222-2222-222222222222";
/// Member without groups or capabilities.
pub const NOBODY: &str = "99999999-9999-9999-9999-999999999999";

pub const MARKETING: SubsiteId = 1;
pub const SUPPORT: SubsiteId = 2;

pub fn plugin_config() -> StaticSubsitesPluginConfig {
    StaticSubsitesPluginConfig {
        subsites: vec![
            SubsiteConfig {
                id: MARKETING,
                title: "Marketing".to_owned(),
                is_default: true,
            },
            SubsiteConfig {
                id: SUPPORT,
                title: "Support".to_owned(),
                is_default: false,
            },
        ],
        groups: vec![
            GroupConfig {
                id: 10,
                title: "Marketing editors".to_owned(),
                access_all_subsites: false,
                subsite_ids: vec![MARKETING],
            },
            GroupConfig {
                id: 11,
                title: "Support editors".to_owned(),
                access_all_subsites: false,
                subsite_ids: vec![SUPPORT],
            },
        ],
        members: vec![
            member_config(ADMIN, &[capabilities::ADMIN], &[]),
            member_config(EDITOR, &[], &[10]),
            member_config(MULTI, &[], &[10, 11]),
            member_config(NOBODY, &[], &[]),
        ],
    }
}

fn member_config(id: &str, caps: &[&str], groups: &[u64]) -> MemberConfig {
    MemberConfig {
        id: Uuid::parse_str(id).unwrap(),
        capabilities: caps.iter().map(|c| (*c).to_owned()).collect(),
        groups: groups.to_vec(),
    }
}

fn section(name: &str, url: &str) -> SectionConfig {
    SectionConfig {
        name: name.to_owned(),
        url: url.to_owned(),
        page_editing: false,
        treats_main_site_as_global: false,
        session_namespace: None,
        show_in_menu_on_subsites: false,
    }
}

/// Sections of a typical installation, in menu order.
pub fn sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig {
            show_in_menu_on_subsites: true,
            ..section("pages", "admin/pages")
        },
        SectionConfig {
            page_editing: true,
            session_namespace: Some("pages".to_owned()),
            ..section("page-edit", "admin/pages/edit")
        },
        SectionConfig {
            treats_main_site_as_global: true,
            show_in_menu_on_subsites: true,
            ..section("assets", "admin/assets")
        },
        section("reports", "admin/reports"),
    ]
}

pub fn config() -> SubsitesConfig {
    SubsitesConfig {
        sections: sections(),
        ..SubsitesConfig::default()
    }
}

pub fn plugin(cfg: &StaticSubsitesPluginConfig) -> Arc<static_subsites_plugin::Service> {
    Arc::new(static_subsites_plugin::Service::from_config(cfg).unwrap())
}

/// Service backed by the static plugin for both catalog and permissions.
pub fn service_with(cfg: &StaticSubsitesPluginConfig) -> (Service, Arc<static_subsites_plugin::Service>) {
    let plugin = plugin(cfg);
    let catalog: Arc<dyn SubsiteCatalog> = plugin.clone();
    let oracle: Arc<dyn PermissionOracle> = plugin.clone();
    (Service::new(config(), catalog, oracle).unwrap(), plugin)
}

pub fn service() -> (Service, Arc<static_subsites_plugin::Service>) {
    service_with(&plugin_config())
}

pub fn member(plugin: &static_subsites_plugin::Service, id: &str) -> Member {
    plugin.member(Uuid::parse_str(id).unwrap()).unwrap()
}

/// Session whose persisted current subsite is `id`.
pub fn session_on(id: SubsiteId) -> InMemorySessionStore {
    let session = InMemorySessionStore::new();
    session.set(SESSION_SUBSITE_KEY, Value::from(id));
    session
}

pub fn persisted_subsite(session: &InMemorySessionStore) -> Option<u64> {
    session.get(SESSION_SUBSITE_KEY).and_then(|v| v.as_u64())
}

/// Section owner allowing exactly the listed subsites.
pub struct AllowList(pub Vec<SubsiteId>);

impl AccessCheckable for AllowList {
    fn can_access(
        &self,
        _member: Option<&Member>,
        state: &SubsiteState,
    ) -> Result<AccessDecision, SubsitesError> {
        if self.0.contains(&state.current_id()) {
            Ok(AccessDecision::Allow)
        } else {
            Ok(AccessDecision::Deny)
        }
    }
}

/// Service whose sections are all owned by [`AllowList`]s, registered in
/// the given order with URL `admin/<name>`.
pub fn scripted_service(owners: Vec<(&str, Vec<SubsiteId>)>) -> Service {
    let plugin = plugin(&plugin_config());
    let catalog: Arc<dyn SubsiteCatalog> = plugin.clone();
    let oracle: Arc<dyn PermissionOracle> = plugin;
    Service::with_sections(SubsitesConfig::default(), catalog, oracle, |_, registry| {
        for (name, allowed) in owners {
            let owner: Arc<dyn AccessCheckable> = Arc::new(AllowList(allowed));
            registry.register(SectionDescriptor::new(name, &format!("admin/{name}"), owner))?;
        }
        Ok(())
    })
    .unwrap()
}
