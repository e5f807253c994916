//! Route table and URL resolver capabilities
//!
//! The link pipeline never builds URLs by hand. It asks a [`RouteTable`] for
//! the declared template and methods of a named route, and a [`UrlResolver`]
//! to expand a route name and its values into a concrete path.

use crate::core::error::{HypermediaError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A property of a query-string bound route parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryProperty {
    /// Property name
    pub name: String,

    /// Alternate names under which the property is read from the query string
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_names: Vec<String>,
}

impl QueryProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alternate_names: Vec::new(),
        }
    }

    pub fn with_alternate_name(mut self, alternate: impl Into<String>) -> Self {
        self.alternate_names.push(alternate.into());
        self
    }

    /// Name used in the query template
    ///
    /// The first alternate name wins unless it is blank.
    pub fn query_name(&self) -> &str {
        match self.alternate_names.first() {
            Some(alternate) if !alternate.trim().is_empty() => alternate,
            _ => &self.name,
        }
    }

    /// Derive query properties from the serialized field names of a value
    ///
    /// Field renames declared with `#[serde(rename = "...")]` are already
    /// applied by serialization, so they become the property names.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Vec<QueryProperty>> {
        match serde_json::to_value(value) {
            Ok(Value::Object(fields)) => Ok(fields.keys().map(QueryProperty::new).collect()),
            Ok(other) => Err(HypermediaError::invalid_argument(
                "query",
                format!("query parameters must serialize to an object, got {}", other),
            )),
            Err(e) => Err(HypermediaError::invalid_argument("query", e.to_string())),
        }
    }
}

/// A registered, named HTTP endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Route name (e.g., "Person")
    pub name: String,

    /// URL template (e.g., "/person/{id}")
    #[serde(default)]
    pub template: Option<String>,

    /// Declared HTTP methods, in declaration order
    #[serde(default)]
    pub methods: Vec<String>,

    /// Properties of the query-string bound parameter, if the route has one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryProperty>,
}

impl RouteDescriptor {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: Some(template.into()),
            methods: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into());
        self
    }

    pub fn with_query(mut self, properties: Vec<QueryProperty>) -> Self {
        self.query = properties;
        self
    }

    /// First declared method, if any
    pub fn primary_method(&self) -> Option<&str> {
        self.methods
            .first()
            .map(String::as_str)
            .filter(|method| !method.trim().is_empty())
    }

    /// `{?a,b}` query template suffix, empty when the route has no query parameter
    pub fn query_template(&self) -> String {
        if self.query.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = self.query.iter().map(QueryProperty::query_name).collect();
        format!("{{?{}}}", names.join(","))
    }
}

/// Read access to the routes registered with the host framework
pub trait RouteTable: Send + Sync {
    /// Look up a route by name
    fn lookup(&self, name: &str) -> Option<&RouteDescriptor>;

    /// Look up a route by its URL template
    ///
    /// Used to map the path matched for the current request back to a route
    /// name. Tables that cannot answer return `None`.
    fn find_by_template(&self, _template: &str) -> Option<&RouteDescriptor> {
        None
    }
}

/// Expands a route name and optional values into a concrete URL path
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, route_name: &str, route_values: Option<&Value>) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_query_name_prefers_alternate() {
        assert_eq!(QueryProperty::new("page_size").query_name(), "page_size");
        assert_eq!(
            QueryProperty::new("page_size")
                .with_alternate_name("pageSize")
                .with_alternate_name("size")
                .query_name(),
            "pageSize"
        );
        assert_eq!(
            QueryProperty::new("page_size")
                .with_alternate_name(" ")
                .query_name(),
            "page_size"
        );
    }

    #[test]
    fn test_query_template() {
        let route = RouteDescriptor::new("People", "/people").with_query(vec![
            QueryProperty::new("page"),
            QueryProperty::new("page_size").with_alternate_name("pageSize"),
        ]);
        assert_eq!(route.query_template(), "{?page,pageSize}");
        assert_eq!(RouteDescriptor::new("Person", "/person/{id}").query_template(), "");
    }

    #[test]
    fn test_from_serialize_uses_serde_names() {
        #[derive(Serialize, Default)]
        struct Paging {
            page: u32,
            #[serde(rename = "pageSize")]
            page_size: u32,
        }

        let properties = QueryProperty::from_serialize(&Paging::default()).unwrap();
        let names: Vec<&str> = properties.iter().map(|p| p.query_name()).collect();
        assert!(names.contains(&"page"));
        assert!(names.contains(&"pageSize"));
    }

    #[test]
    fn test_from_serialize_rejects_scalars() {
        assert!(QueryProperty::from_serialize(&42).is_err());
    }

    #[test]
    fn test_primary_method() {
        let route = RouteDescriptor::new("Person", "/person/{id}")
            .with_method("GET")
            .with_method("POST");
        assert_eq!(route.primary_method(), Some("GET"));
        assert_eq!(RouteDescriptor::new("Person", "/person/{id}").primary_method(), None);
    }
}
