//! Tests for configuration parsing.

#[cfg(test)]
mod tests {
    use crate::config::SubsitesConfig;

    #[test]
    fn test_config_default() {
        let config = SubsitesConfig::default();
        assert_eq!(config.admin_url_base, "admin");
        assert_eq!(config.pages_section, "pages");
        assert_eq!(config.main_site_title, "Main site");
        assert_eq!(config.switch_param, "SubsiteID");
        assert_eq!(
            config.bypass_capabilities,
            vec!["ADMIN".to_owned(), "CMS_ACCESS_LeftAndMain".to_owned()]
        );
        assert!(config.sections.is_empty());
    }

    #[test]
    fn test_admin_root_url_has_single_trailing_slash() {
        let mut config = SubsitesConfig::default();
        assert_eq!(config.admin_root_url(), "admin/");

        config.admin_url_base = "backoffice/".to_owned();
        assert_eq!(config.admin_root_url(), "backoffice/");
    }

    #[test]
    fn test_config_parse_sections() {
        let yaml = r#"
admin_url_base: "cms"
sections:
  - name: "pages"
    url: "cms/pages"
    show_in_menu_on_subsites: true
  - name: "page-edit"
    url: "cms/pages/edit"
    page_editing: true
  - name: "assets"
    url: "cms/assets"
    treats_main_site_as_global: true
    session_namespace: "AssetAdmin"
"#;
        let config: SubsitesConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.admin_url_base, "cms");
        assert_eq!(config.sections.len(), 3);

        let edit = &config.sections[1];
        assert!(edit.page_editing);
        assert!(!edit.treats_main_site_as_global);
        assert!(edit.session_namespace.is_none());

        let assets = &config.sections[2];
        assert!(assets.treats_main_site_as_global);
        assert_eq!(assets.session_namespace.as_deref(), Some("AssetAdmin"));
    }

    #[test]
    fn test_config_applies_defaults() {
        let yaml = r#"
main_site_title: "Headquarters"
"#;
        let config: SubsitesConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.main_site_title, "Headquarters");
        assert_eq!(config.admin_url_base, "admin"); // default
        assert_eq!(config.bypass_capabilities.len(), 2); // default
    }

    #[test]
    fn test_config_reject_unknown_fields() {
        let yaml = r#"
admin_url_base: "admin"
unknown_field: "should fail"
"#;
        let result: Result<SubsitesConfig, _> = serde_saphyr::from_str(yaml);
        assert!(
            result.is_err(),
            "Config should reject unknown fields due to deny_unknown_fields"
        );
    }
}
