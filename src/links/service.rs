//! Hypermedia service: the link generation pipeline
//!
//! For each link the service resolves the route name, asks the base URL
//! provider for the href prefix and the path provider for the path, runs the
//! enrichers over a fresh context, and hands the context to the link factory.
//! Any failure aborts the call; no partial link is ever returned.

use crate::core::context::LinkFactoryContext;
use crate::core::error::{HypermediaError, Result};
use crate::core::extractors::RequestContext;
use crate::core::link::LinkValue;
use crate::core::request::{LinkRequest, LinkRequestBuilder, ROUTE_NAME_KEY};
use crate::core::route::RouteTable;
use crate::links::base_url::BaseUrlProvider;
use crate::links::enrichers::LinkDataEnricher;
use crate::links::factory::LinkFactory;
use crate::links::path::UrlPathProvider;
use serde_json::Value;
use std::sync::Arc;

/// Generates links for route names
///
/// Cheap to clone; every call works on its own request and context, so one
/// service can be shared by all request handlers.
#[derive(Clone)]
pub struct HypermediaService {
    routes: Arc<dyn RouteTable>,
    base_url_provider: Arc<dyn BaseUrlProvider>,
    path_provider: Arc<dyn UrlPathProvider>,
    enrichers: Arc<Vec<Arc<dyn LinkDataEnricher>>>,
    factory: Arc<dyn LinkFactory>,
}

impl HypermediaService {
    /// Assemble a service from its collaborators
    ///
    /// Enrichers run in the order given. Most callers use
    /// [`HypermediaBuilder`](crate::server::HypermediaBuilder) instead.
    pub fn new(
        routes: Arc<dyn RouteTable>,
        base_url_provider: Arc<dyn BaseUrlProvider>,
        path_provider: Arc<dyn UrlPathProvider>,
        enrichers: Vec<Arc<dyn LinkDataEnricher>>,
        factory: Arc<dyn LinkFactory>,
    ) -> Self {
        Self {
            routes,
            base_url_provider,
            path_provider,
            enrichers: Arc::new(enrichers),
            factory,
        }
    }

    /// Link to the route serving the current request
    pub fn get_current_link(&self, context: &RequestContext) -> Result<LinkValue> {
        self.get_link(context, LinkRequestBuilder::new().build())
    }

    /// Link to `route_name`, or to the current route when `None`
    pub fn get_route_link(
        &self,
        context: &RequestContext,
        route_name: Option<&str>,
        route_values: Option<Value>,
    ) -> Result<LinkValue> {
        let builder = match route_name {
            Some(name) => LinkRequestBuilder::create_with_route_name(name)?,
            None => LinkRequestBuilder::new(),
        };
        let request = builder.set_route_values_if_not_null(route_values)?.build();
        self.get_link(context, request)
    }

    /// Link described by a compact key such as `Person|templated=true`
    pub fn get_link_for_key(&self, context: &RequestContext, key: &str) -> Result<LinkValue> {
        self.get_link(context, LinkRequest::parse(key)?)
    }

    /// Run the pipeline for `request`
    pub fn get_link(&self, context: &RequestContext, request: LinkRequest) -> Result<LinkValue> {
        let request = self.with_route_name(context, request)?;
        let route_name = request.route_name().unwrap_or_default().to_string();

        let base_url = self.base_url_provider.base_url(context).ok_or_else(|| {
            HypermediaError::operation(
                ROUTE_NAME_KEY,
                &route_name,
                "base URL provider returned no URL",
            )
        })?;

        let url_path = self.path_provider.url_path(&request)?.ok_or_else(|| {
            HypermediaError::operation(
                ROUTE_NAME_KEY,
                &route_name,
                "URL path provider returned no path",
            )
        })?;

        let mut link_context = LinkFactoryContext::with_url(base_url, url_path)?;
        {
            let mut writer = link_context.writer();
            for enricher in self.enrichers.iter() {
                enricher.enrich(&request, &mut writer)?;
            }
        }

        let link = self.factory.create(&link_context)?;
        tracing::debug!(
            route = %route_name,
            href = link.href().unwrap_or_default(),
            "Link generated"
        );
        Ok(link)
    }

    /// Fill in the route name from the request context when the request has none
    ///
    /// A route name that is present but blank is rejected rather than replaced.
    fn with_route_name(
        &self,
        context: &RequestContext,
        request: LinkRequest,
    ) -> Result<LinkRequest> {
        let blank = request
            .get(ROUTE_NAME_KEY)
            .map(|name| name.as_str().is_none_or(|name| name.trim().is_empty()));
        match blank {
            Some(false) => return Ok(request),
            Some(true) => {
                return Err(HypermediaError::invalid_argument(
                    ROUTE_NAME_KEY,
                    "route name must be a non-blank string",
                ));
            }
            None => {}
        }

        let current = context
            .route_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                context
                    .matched_path
                    .as_deref()
                    .and_then(|path| self.routes.find_by_template(path))
                    .map(|route| route.name.clone())
            })
            .ok_or_else(|| {
                HypermediaError::invalid_argument(
                    ROUTE_NAME_KEY,
                    "no route name given and the current route is unknown",
                )
            })?;

        Ok(request.to_builder().set(ROUTE_NAME_KEY, current)?.build())
    }
}
