//! In-process route table
//!
//! [`RouteRegistry`] keeps the named routes of an API and answers both
//! collaborator roles of the link pipeline: it is the [`RouteTable`] read by
//! the templated path builder and the enrichers, and the [`UrlResolver`] that
//! expands a route name and its values into a concrete path.

use crate::config::HypermediaConfig;
use crate::core::route::{RouteDescriptor, RouteTable, UrlResolver};
use crate::core::uri::placeholder_regex;
use indexmap::IndexMap;
use regex::Captures;
use serde_json::Value;

/// Registry mapping route names to route descriptors
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    /// Maps route_name -> descriptor, in registration order
    routes: IndexMap<String, RouteDescriptor>,
}

impl RouteRegistry {
    /// Create a registry from route descriptors
    ///
    /// A later descriptor with the same name replaces an earlier one.
    pub fn new(routes: impl IntoIterator<Item = RouteDescriptor>) -> Self {
        let mut registry = Self::default();
        for route in routes {
            registry.register(route);
        }
        registry
    }

    /// Create a registry from the routes of a configuration
    pub fn from_config(config: &HypermediaConfig) -> Self {
        Self::new(config.routes.iter().cloned())
    }

    /// Register or replace a route
    pub fn register(&mut self, route: RouteDescriptor) {
        self.routes.insert(route.name.clone(), route);
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_route(mut self, route: RouteDescriptor) -> Self {
        self.register(route);
        self
    }

    /// All registered routes, in registration order
    pub fn routes(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteTable for RouteRegistry {
    fn lookup(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.get(name)
    }

    fn find_by_template(&self, template: &str) -> Option<&RouteDescriptor> {
        let wanted = template.trim_start_matches('/');
        self.routes.values().find(|route| {
            route
                .template
                .as_deref()
                .is_some_and(|candidate| candidate.trim_start_matches('/') == wanted)
        })
    }
}

impl UrlResolver for RouteRegistry {
    fn resolve(&self, route_name: &str, route_values: Option<&Value>) -> Option<String> {
        let template = self.lookup(route_name)?.template.as_deref()?;
        let path = expand_template(template, route_values)?;
        if path.starts_with('/') {
            Some(path)
        } else {
            Some(format!("/{}", path))
        }
    }
}

/// Expand `{name}` and `{*name}` placeholders from route values
///
/// Values not consumed by a placeholder are appended as a query string.
/// Returns `None` when a placeholder has no usable value.
fn expand_template(template: &str, route_values: Option<&Value>) -> Option<String> {
    let regex = placeholder_regex();
    let placeholder_count = regex.captures_iter(template).count();

    let mut values: IndexMap<String, String> = IndexMap::new();
    match route_values {
        None | Some(Value::Null) => {}
        Some(Value::Object(fields)) => {
            for (key, value) in fields {
                if let Some(value) = scalar_to_string(value) {
                    values.insert(key.clone(), value);
                }
            }
        }
        // A lone scalar fills the only placeholder of the template
        Some(scalar) => {
            if placeholder_count != 1 {
                return None;
            }
            let name = regex.captures(template)?[1].to_string();
            values.insert(name, scalar_to_string(scalar)?);
        }
    }

    let mut missing = false;
    let path = regex.replace_all(template, |caps: &Captures| {
        let wildcard = caps[0].starts_with("{*");
        match values.shift_remove(&caps[1]) {
            Some(value) if wildcard => value
                .split('/')
                .map(|segment| urlencoding::encode(segment).into_owned())
                .collect::<Vec<_>>()
                .join("/"),
            Some(value) => urlencoding::encode(&value).into_owned(),
            None => {
                missing = true;
                String::new()
            }
        }
    });
    if missing {
        return None;
    }

    let mut url = path.into_owned();
    if !values.is_empty() {
        let query: Vec<String> = values
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect();
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query.join("&"));
    }
    Some(url)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
