//! URL path resolution
//!
//! A link request resolves either to a concrete path, expanded by the
//! [`UrlResolver`], or to the raw URI template declared in the [`RouteTable`]
//! when the request carries `templated=true`.

use crate::core::error::{HypermediaError, Result};
use crate::core::request::{LinkRequest, ROUTE_NAME_KEY};
use crate::core::route::{RouteTable, UrlResolver};
use crate::core::uri;
use std::sync::Arc;

/// Produces the path part of a link href
pub trait UrlPathProvider: Send + Sync {
    /// Path for `request`; `Ok(None)` when the provider has nothing to offer
    fn url_path(&self, request: &LinkRequest) -> Result<Option<String>>;
}

/// Path provider backed by the route table and URL resolver
#[derive(Clone)]
pub struct RoutePathProvider {
    routes: Arc<dyn RouteTable>,
    resolver: Arc<dyn UrlResolver>,
}

impl RoutePathProvider {
    pub fn new(routes: Arc<dyn RouteTable>, resolver: Arc<dyn UrlResolver>) -> Self {
        Self { routes, resolver }
    }

    /// Expand the route with its values into a concrete path
    pub fn resolved_path(&self, route_name: &str, request: &LinkRequest) -> Result<String> {
        let path = self
            .resolver
            .resolve(route_name, request.route_values())
            .filter(|path| !path.trim().is_empty())
            .ok_or_else(|| {
                tracing::warn!(route = %route_name, "URL resolver returned no path");
                HypermediaError::operation(
                    ROUTE_NAME_KEY,
                    route_name,
                    "URL resolver returned an empty URL",
                )
            })?;

        if !uri::is_well_formed(&path) {
            tracing::warn!(
                route = %route_name,
                path = %path,
                "URL resolver returned a malformed URI"
            );
            return Err(HypermediaError::operation(
                ROUTE_NAME_KEY,
                route_name,
                format!("URL resolver returned a malformed URI '{}'", path),
            ));
        }
        Ok(path)
    }

    /// Build the URI template declared for the route
    ///
    /// Braces are stripped only for validation; the returned path keeps its
    /// `{placeholder}` segments and gains a `{?name,...}` suffix when the route
    /// binds a query parameter.
    pub fn templated_path(&self, route_name: &str) -> Result<String> {
        let route = self
            .routes
            .lookup(route_name)
            .ok_or_else(|| HypermediaError::RouteNotFound {
                route_name: route_name.to_string(),
            })?;

        let template = route
            .template
            .as_deref()
            .filter(|template| !template.trim().is_empty())
            .ok_or_else(|| {
                HypermediaError::operation(
                    ROUTE_NAME_KEY,
                    route_name,
                    "route has no URL template",
                )
            })?;

        let mut path = if template.starts_with('/') {
            template.to_string()
        } else {
            format!("/{}", template)
        };
        path.push_str(&route.query_template());

        if !uri::is_well_formed(&uri::strip_template_braces(&path)) {
            return Err(HypermediaError::operation(
                ROUTE_NAME_KEY,
                route_name,
                format!("route template '{}' is not a well-formed URI", template),
            ));
        }
        Ok(path)
    }
}

impl UrlPathProvider for RoutePathProvider {
    fn url_path(&self, request: &LinkRequest) -> Result<Option<String>> {
        let route_name = request
            .route_name()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                HypermediaError::invalid_argument(ROUTE_NAME_KEY, "link request has no route name")
            })?;

        let path = if request.is_templated() {
            self.templated_path(route_name)?
        } else {
            self.resolved_path(route_name, request)?
        };
        Ok(Some(path))
    }
}
