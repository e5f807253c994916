//! Attaching links to outgoing documents
//!
//! [`Resource`] wraps any serializable payload with a `_links` object keyed by
//! relation name:
//!
//! ```json
//! {
//!   "id": 1,
//!   "name": "Ada",
//!   "_links": {
//!     "self": { "href": "https://api.example.com/person/1", "method": "GET" }
//!   }
//! }
//! ```

use crate::core::error::{HypermediaError, Result};
use crate::core::extractors::RequestContext;
use crate::core::link::{HttpLink, LinkValue};
use crate::links::service::HypermediaService;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Relation name of a document's own link
pub const SELF_REL: &str = "self";

/// Ordered relation name -> link map
pub type Links = IndexMap<String, LinkValue>;

/// Anything that carries a set of links
///
/// Implementors only provide [`links_mut`](Self::links_mut); the helpers
/// build links through a [`HypermediaService`].
pub trait LinkContainer {
    fn links_mut(&mut self) -> &mut Links;

    /// Attach a link with a literal href and optional method
    fn add_link(
        &mut self,
        rel: impl Into<String>,
        href: impl Into<String>,
        method: Option<&str>,
    ) -> Result<&mut Self> {
        let rel = validate_rel(rel.into())?;
        let href = href.into();
        if href.trim().is_empty() {
            return Err(HypermediaError::invalid_argument("href", "href must not be blank"));
        }
        let link = HttpLink::new(Some(href), method.map(str::to_string));
        self.links_mut().insert(rel, link.into());
        Ok(self)
    }

    /// Attach a link generated for `route_name`
    fn add_route_link(
        &mut self,
        service: &HypermediaService,
        context: &RequestContext,
        rel: impl Into<String>,
        route_name: &str,
        route_values: Option<Value>,
    ) -> Result<&mut Self> {
        let rel = validate_rel(rel.into())?;
        let link = service.get_route_link(context, Some(route_name), route_values)?;
        self.links_mut().insert(rel, link);
        Ok(self)
    }

    /// Attach the `self` link, generated for the route serving the request
    fn add_self_route_link(
        &mut self,
        service: &HypermediaService,
        context: &RequestContext,
        route_values: Option<Value>,
    ) -> Result<&mut Self> {
        let link = service.get_route_link(context, None, route_values)?;
        self.links_mut().insert(SELF_REL.to_string(), link);
        Ok(self)
    }
}

fn validate_rel(rel: String) -> Result<String> {
    if rel.trim().is_empty() {
        return Err(HypermediaError::invalid_argument("rel", "relation name must not be blank"));
    }
    Ok(rel)
}

/// A payload with hypermedia links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource<T> {
    #[serde(flatten)]
    pub data: T,

    #[serde(rename = "_links", default, skip_serializing_if = "IndexMap::is_empty")]
    pub links: Links,
}

impl<T> Resource<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            links: Links::new(),
        }
    }

    pub fn link(&self, rel: &str) -> Option<&LinkValue> {
        self.links.get(rel)
    }
}

impl<T> LinkContainer for Resource<T> {
    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}
