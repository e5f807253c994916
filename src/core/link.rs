//! Link value objects produced at the end of the pipeline

use crate::core::context::{FromContextValue, LinkFactoryContext};
use crate::core::error::Result;
use serde::{Deserialize, Serialize};

/// A plain hypermedia link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct Link {
    /// Fully assembled link target
    pub href: Option<String>,
}

impl Link {
    pub fn new(href: Option<String>) -> Self {
        Self { href }
    }
}

/// A link carrying the HTTP method and URI-template flag of its route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HttpLink {
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Only ever `Some(true)`; a non-templated link leaves it unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
}

impl HttpLink {
    pub fn new(href: Option<String>, method: Option<String>) -> Self {
        Self {
            href,
            method,
            templated: None,
        }
    }
}

/// Any link a factory can produce
///
/// Deserializes as [`Link`] when the object carries only an `href`, and as
/// [`HttpLink`] once `method` or `templated` is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LinkValue {
    Basic(Link),
    Http(HttpLink),
}

impl LinkValue {
    pub fn href(&self) -> Option<&str> {
        match self {
            LinkValue::Basic(link) => link.href.as_deref(),
            LinkValue::Http(link) => link.href.as_deref(),
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            LinkValue::Basic(_) => None,
            LinkValue::Http(link) => link.method.as_deref(),
        }
    }

    pub fn is_templated(&self) -> bool {
        match self {
            LinkValue::Basic(_) => false,
            LinkValue::Http(link) => link.templated == Some(true),
        }
    }
}

impl From<Link> for LinkValue {
    fn from(link: Link) -> Self {
        LinkValue::Basic(link)
    }
}

impl From<HttpLink> for LinkValue {
    fn from(link: HttpLink) -> Self {
        LinkValue::Http(link)
    }
}

/// Fluent helper copying optional context values onto a link
///
/// # Example
///
/// ```
/// use hypermedia::core::context::{LinkFactoryContext, TEMPLATED_KEY};
/// use hypermedia::core::link::{HttpLink, LinkMapper};
///
/// let mut context = LinkFactoryContext::with_url("", "/person/{id}").unwrap();
/// context.set(TEMPLATED_KEY, true).unwrap();
///
/// let link = LinkMapper::new(&context, HttpLink::new(context.href(), None))
///     .map_if_existing::<bool, _>(TEMPLATED_KEY, |link, templated| {
///         link.templated = Some(templated);
///     })
///     .unwrap()
///     .into_link();
///
/// assert_eq!(link.templated, Some(true));
/// ```
pub struct LinkMapper<'a, L> {
    context: &'a LinkFactoryContext,
    link: L,
}

impl<'a, L> LinkMapper<'a, L> {
    pub fn new(context: &'a LinkFactoryContext, link: L) -> Self {
        Self { context, link }
    }

    /// Apply `map` when `key` exists in the context
    ///
    /// A value of the wrong type fails with a type mismatch error.
    pub fn map_if_existing<T, F>(mut self, key: &str, map: F) -> Result<Self>
    where
        T: FromContextValue,
        F: FnOnce(&mut L, T),
    {
        if let Some(value) = self.context.get_as::<T>(key)? {
            map(&mut self.link, value);
        }
        Ok(self)
    }

    pub fn into_link(self) -> L {
        self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::{HTTP_METHOD_KEY, TEMPLATED_KEY};

    #[test]
    fn test_map_if_existing_skips_missing() {
        let context = LinkFactoryContext::new();
        let link = LinkMapper::new(&context, HttpLink::default())
            .map_if_existing::<String, _>(HTTP_METHOD_KEY, |link, method| {
                link.method = Some(method);
            })
            .unwrap()
            .into_link();
        assert_eq!(link.method, None);
    }

    #[test]
    fn test_map_if_existing_chains() {
        let mut context = LinkFactoryContext::new();
        context.set(HTTP_METHOD_KEY, "GET").unwrap();
        context.set(TEMPLATED_KEY, true).unwrap();

        let link = LinkMapper::new(&context, HttpLink::default())
            .map_if_existing::<String, _>(HTTP_METHOD_KEY, |link, method| {
                link.method = Some(method);
            })
            .unwrap()
            .map_if_existing::<bool, _>(TEMPLATED_KEY, |link, templated| {
                link.templated = Some(templated);
            })
            .unwrap()
            .into_link();

        assert_eq!(link.method.as_deref(), Some("GET"));
        assert_eq!(link.templated, Some(true));
    }

    #[test]
    fn test_map_if_existing_type_mismatch() {
        let mut context = LinkFactoryContext::new();
        context.set(TEMPLATED_KEY, "true").unwrap();

        let result = LinkMapper::new(&context, HttpLink::default())
            .map_if_existing::<bool, _>(TEMPLATED_KEY, |link, templated| {
                link.templated = Some(templated);
            });
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let link = LinkValue::from(HttpLink::new(
            Some("/person/1".to_string()),
            Some("GET".to_string()),
        ));
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json, serde_json::json!({ "href": "/person/1", "method": "GET" }));
    }

    #[test]
    fn test_deserialize_picks_variant_by_fields() {
        let basic = LinkValue::Basic(Link::new(Some("/people".to_string())));
        let json = serde_json::to_string(&basic).unwrap();
        assert_eq!(serde_json::from_str::<LinkValue>(&json).unwrap(), basic);

        let http: LinkValue = serde_json::from_value(serde_json::json!({
            "href": "/person/{id}",
            "method": "GET",
            "templated": true
        }))
        .unwrap();
        assert_eq!(http.method(), Some("GET"));
        assert!(http.is_templated());
    }
}
