//! Link requests: the immutable description of the link to build

use crate::core::error::{HypermediaError, Result};
use crate::core::key::{self, ID_KEY};
use indexmap::IndexMap;
use serde_json::Value;

/// Key holding the target route name
pub const ROUTE_NAME_KEY: &str = "routeName";

/// Key holding the structured route values
pub const ROUTE_VALUES_KEY: &str = "routeValues";

/// Key flagging a request for a URI template instead of a concrete URL
pub const TEMPLATED_KEY: &str = "templated";

/// An immutable set of named parts describing one link
///
/// Requests are created by [`LinkRequestBuilder::build`] or by parsing a link
/// key with [`LinkRequest::parse`], and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkRequest {
    parts: IndexMap<String, Value>,
}

impl LinkRequest {
    /// Parse a link key such as `Person|templated=true`
    ///
    /// The parser's reserved id value becomes the route name.
    pub fn parse(raw: &str) -> Result<Self> {
        let parsed = key::parse_key(raw)?;

        let mut builder = LinkRequestBuilder::new();
        for (key, value) in parsed {
            builder = if key == ID_KEY {
                if value.trim().is_empty() {
                    return Err(HypermediaError::invalid_argument(
                        ROUTE_NAME_KEY,
                        format!("link key '{}' names a blank route", raw),
                    ));
                }
                builder.set(ROUTE_NAME_KEY, Value::String(value))?
            } else {
                builder.set(key, Value::String(value))?
            };
        }
        Ok(builder.build())
    }

    /// Get a raw part by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.parts.get(key)
    }

    /// Get a part as a string slice, if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.parts.get(key).and_then(Value::as_str)
    }

    /// Get the target route name
    pub fn route_name(&self) -> Option<&str> {
        self.get_str(ROUTE_NAME_KEY)
    }

    /// Get the route values used to expand the route
    pub fn route_values(&self) -> Option<&Value> {
        self.parts.get(ROUTE_VALUES_KEY)
    }

    /// Whether the request asks for a URI template
    ///
    /// Only a `templated` part that parses as boolean `true` counts; absent,
    /// `false` or unparsable values all yield `false`.
    pub fn is_templated(&self) -> bool {
        match self.parts.get(TEMPLATED_KEY) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(raw)) => parse_bool(raw) == Some(true),
            _ => false,
        }
    }

    /// Iterate over all parts in insertion order
    pub fn parts(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.parts.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Start a new builder seeded with this request's parts
    pub fn to_builder(&self) -> LinkRequestBuilder {
        LinkRequestBuilder {
            parts: self.parts.clone(),
        }
    }
}

/// Case-insensitive boolean parsing, surrounding whitespace ignored
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Mutable accumulator for [`LinkRequest`]
///
/// # Example
///
/// ```
/// use hypermedia::core::request::LinkRequestBuilder;
/// use serde_json::json;
///
/// let request = LinkRequestBuilder::create_with_route_name("Person")
///     .unwrap()
///     .set_route_values_if_not_null(Some(json!({ "id": 1 })))
///     .unwrap()
///     .build();
///
/// assert_eq!(request.route_name(), Some("Person"));
/// assert!(!request.is_templated());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkRequestBuilder {
    parts: IndexMap<String, Value>,
}

impl LinkRequestBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder targeting the given route
    pub fn create_with_route_name(route_name: impl Into<String>) -> Result<Self> {
        let route_name = route_name.into();
        if route_name.trim().is_empty() {
            return Err(HypermediaError::invalid_argument(
                ROUTE_NAME_KEY,
                "route name must not be blank",
            ));
        }
        Self::new().set(ROUTE_NAME_KEY, Value::String(route_name))
    }

    /// Set a part, replacing any previous value
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(HypermediaError::invalid_argument(
                "key",
                "request key must not be blank",
            ));
        }
        let value = value.into();
        if value.is_null() {
            return Err(HypermediaError::invalid_argument(
                key,
                "request value must not be null",
            ));
        }
        self.parts.insert(key, value);
        Ok(self)
    }

    /// Set a part unless the value is absent
    pub fn set_if_not_null<V: Into<Value>>(
        self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Result<Self> {
        match value.map(Into::<Value>::into) {
            Some(value) if !value.is_null() => self.set(key, value),
            _ => Ok(self),
        }
    }

    /// Set the route values unless absent
    pub fn set_route_values_if_not_null(self, value: Option<Value>) -> Result<Self> {
        self.set_if_not_null(ROUTE_VALUES_KEY, value)
    }

    /// Mark the request as templated
    pub fn templated(self, templated: bool) -> Result<Self> {
        self.set(TEMPLATED_KEY, Value::Bool(templated))
    }

    /// Freeze the accumulated parts into a request
    ///
    /// The builder keeps its own copy so later edits never leak into the
    /// returned request.
    pub fn build(&self) -> LinkRequest {
        LinkRequest {
            parts: self.parts.clone(),
        }
    }
}
