//! Integration tests for configuration loading and merging

use hypermedia::prelude::*;
use std::io::Write;

const BASE_YAML: &str = r#"
base_url:
  strategy: custom
  url: https://api.example.com
routes:
  - name: Person
    template: /person/{id}
    methods: [GET]
  - name: People
    template: /people
    methods: [GET]
"#;

const OVERRIDE_YAML: &str = r#"
link_factory: basic
routes:
  - name: People
    template: /persons
    methods: [GET, POST]
  - name: Health
    template: /health
"#;

#[test]
fn test_defaults_when_fields_missing() {
    let config = HypermediaConfig::from_yaml_str("routes: []").unwrap();

    assert_eq!(config.base_url, BaseUrlConfig::CurrentRequest);
    assert_eq!(
        config.enrichers,
        vec![EnricherKind::HttpMethod, EnricherKind::Templated]
    );
    assert_eq!(config.link_factory, LinkFactoryKind::Http);
    assert!(config.routes.is_empty());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BASE_YAML.as_bytes()).unwrap();

    let config = HypermediaConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(
        config.base_url,
        BaseUrlConfig::Custom {
            url: "https://api.example.com".to_string()
        }
    );
    assert_eq!(config.routes.len(), 2);
    assert_eq!(
        config.find_route("Person").and_then(|route| route.template.as_deref()),
        Some("/person/{id}")
    );
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yaml");
    assert!(HypermediaConfig::from_yaml_file(path.to_str().unwrap()).is_err());
}

#[test]
fn test_invalid_strategy_fails() {
    let result = HypermediaConfig::from_yaml_str("base_url:\n  strategy: somewhere\n");
    assert!(result.is_err());
}

#[test]
fn test_query_properties_loaded() {
    let config = HypermediaConfig::from_yaml_str(
        r#"
routes:
  - name: People
    template: /people
    query:
      - name: page
      - name: page_size
        alternate_names: [pageSize]
"#,
    )
    .unwrap();

    let route = config.find_route("People").unwrap();
    assert_eq!(route.query_template(), "{?page,pageSize}");
}

#[test]
fn test_merge_empty_configs() {
    let merged = HypermediaConfig::merge(vec![]);
    assert_eq!(merged, HypermediaConfig::default());
}

#[test]
fn test_merge_overrides_routes_in_place() {
    let base = HypermediaConfig::from_yaml_str(BASE_YAML).unwrap();
    let overrides = HypermediaConfig::from_yaml_str(OVERRIDE_YAML).unwrap();

    let merged = HypermediaConfig::merge(vec![base, overrides]);

    let names: Vec<&str> = merged.routes.iter().map(|route| route.name.as_str()).collect();
    assert_eq!(names, vec!["Person", "People", "Health"]);

    let people = merged.find_route("People").unwrap();
    assert_eq!(people.template.as_deref(), Some("/persons"));
    assert_eq!(people.methods, vec!["GET", "POST"]);
}

#[test]
fn test_merge_keeps_non_default_settings() {
    let base = HypermediaConfig::from_yaml_str(BASE_YAML).unwrap();
    let overrides = HypermediaConfig::from_yaml_str(OVERRIDE_YAML).unwrap();

    let merged = HypermediaConfig::merge(vec![base, overrides]);

    // The override leaves base_url at its default, so the custom URL survives
    assert_eq!(
        merged.base_url,
        BaseUrlConfig::Custom {
            url: "https://api.example.com".to_string()
        }
    );
    assert_eq!(merged.link_factory, LinkFactoryKind::Basic);
}

#[test]
fn test_merged_config_builds_service() {
    let base = HypermediaConfig::from_yaml_str(BASE_YAML).unwrap();
    let overrides = HypermediaConfig::from_yaml_str(OVERRIDE_YAML).unwrap();
    let merged = HypermediaConfig::merge(vec![base, overrides]);

    let service = HypermediaBuilder::from_config(&merged).unwrap().build().unwrap();
    let link = service
        .get_route_link(&RequestContext::detached(), Some("People"), None)
        .unwrap();

    assert_eq!(
        link,
        LinkValue::Basic(Link::new(Some("https://api.example.com/persons".to_string())))
    );
}

#[test]
fn test_malformed_custom_url_is_config_error() {
    let config = HypermediaConfig::from_yaml_str(
        r#"
base_url:
  strategy: custom
  url: "https://api example.com"
"#,
    )
    .unwrap();

    match HypermediaBuilder::from_config(&config) {
        Err(err) => {
            assert!(matches!(err, HypermediaError::Config(_)));
            assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(_) => panic!("malformed base URL accepted"),
    }
}
