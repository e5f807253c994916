//! URI well-formedness checks and template helpers

use regex::Regex;
use std::sync::OnceLock;

/// Check that a string is a well-formed absolute or relative URI
///
/// Absolute URIs need a `scheme://authority` prefix. Relative references may
/// not contain whitespace or the characters `<>"{}|\^` and backtick, which
/// also rejects unexpanded template placeholders.
pub fn is_well_formed(uri: &str) -> bool {
    static ABSOLUTE_REGEX: OnceLock<Regex> = OnceLock::new();
    static RELATIVE_REGEX: OnceLock<Regex> = OnceLock::new();

    if uri.trim().is_empty() {
        return false;
    }

    let absolute = ABSOLUTE_REGEX.get_or_init(|| {
        Regex::new(r#"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#<>"{}|\\^`]+([/?#][^\s<>"{}|\\^`]*)?$"#)
            .unwrap()
    });
    if absolute.is_match(uri) {
        return true;
    }

    let relative = RELATIVE_REGEX.get_or_init(|| {
        Regex::new(r#"^[^\s<>"{}|\\^`:]*([/?#][^\s<>"{}|\\^`]*)?$"#).unwrap()
    });
    relative.is_match(uri)
}

/// Remove template braces so a URI template can be validated as a plain URI
pub fn strip_template_braces(template: &str) -> String {
    template.chars().filter(|c| *c != '{' && *c != '}').collect()
}

/// Names of the `{name}` and `{*name}` placeholders in a route template
pub fn placeholders(template: &str) -> Vec<String> {
    placeholder_regex()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

pub(crate) fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{\*?([^{}?*]+)\}").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_uris() {
        assert!(is_well_formed("https://api.example.com"));
        assert!(is_well_formed("https://api.example.com/person/1?x=1"));
        assert!(is_well_formed("http://localhost:3000"));
    }

    #[test]
    fn test_relative_uris() {
        assert!(is_well_formed("/person/1"));
        assert!(is_well_formed("person/1"));
        assert!(is_well_formed("/people?page=2"));
    }

    #[test]
    fn test_malformed_uris() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("   "));
        assert!(!is_well_formed("/person/{id}"));
        assert!(!is_well_formed("/person name"));
        assert!(!is_well_formed("http://"));
        assert!(!is_well_formed("not a url"));
    }

    #[test]
    fn test_stripped_template_is_valid() {
        let stripped = strip_template_braces("/person/{id}{?page,size}");
        assert_eq!(stripped, "/person/id?page,size");
        assert!(is_well_formed(&stripped));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders("/person/{id}"), vec!["id"]);
        assert_eq!(
            placeholders("/org/{org_id}/files/{*path}"),
            vec!["org_id", "path"]
        );
        assert!(placeholders("/people").is_empty());
    }
}
