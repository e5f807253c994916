//! HypermediaBuilder for fluent composition of the link pipeline

use crate::config::{BaseUrlConfig, EnricherKind, HypermediaConfig, LinkFactoryKind};
use crate::core::error::{HypermediaError, Result};
use crate::core::route::{RouteTable, UrlResolver};
use crate::links::base_url::{
    BaseUrlProvider, CurrentRequestBaseUrlProvider, CustomBaseUrlProvider, EmptyBaseUrlProvider,
};
use crate::links::enrichers::{HttpMethodEnricher, IsTemplatedEnricher, LinkDataEnricher};
use crate::links::factory::{DefaultLinkFactory, HttpLinkFactory, LinkFactory};
use crate::links::path::{RoutePathProvider, UrlPathProvider};
use crate::links::registry::RouteRegistry;
use crate::links::service::HypermediaService;
use std::sync::Arc;

/// Builder for [`HypermediaService`]
///
/// # Example
///
/// ```
/// use hypermedia::prelude::*;
/// use std::sync::Arc;
///
/// let routes = Arc::new(RouteRegistry::new(vec![
///     RouteDescriptor::new("Person", "/person/{id}").with_method("GET"),
/// ]));
///
/// let service = HypermediaBuilder::new()
///     .with_routes(routes)
///     .with_custom_base_url("https://api.example.com")?
///     .with_http_method_enricher()
///     .with_http_links()
///     .build()?;
///
/// let link = service.get_link_for_key(&RequestContext::detached(), "Person|templated=true")?;
/// assert_eq!(link.href(), Some("https://api.example.com/person/{id}"));
/// # Ok::<(), HypermediaError>(())
/// ```
pub struct HypermediaBuilder {
    routes: Option<Arc<dyn RouteTable>>,
    resolver: Option<Arc<dyn UrlResolver>>,
    base_url_provider: Arc<dyn BaseUrlProvider>,
    path_provider: Option<Arc<dyn UrlPathProvider>>,
    enrichers: Vec<EnricherSlot>,
    factory: Arc<dyn LinkFactory>,
}

/// Enrichers either come ready-made or need the route table, which may be
/// set after them
enum EnricherSlot {
    HttpMethod,
    Custom(Arc<dyn LinkDataEnricher>),
}

impl HypermediaBuilder {
    /// Create a builder with the current-request base URL and basic links
    pub fn new() -> Self {
        Self {
            routes: None,
            resolver: None,
            base_url_provider: Arc::new(CurrentRequestBaseUrlProvider),
            path_provider: None,
            enrichers: Vec::new(),
            factory: Arc::new(DefaultLinkFactory),
        }
    }

    /// Create a builder from a configuration
    ///
    /// The configured routes become a [`RouteRegistry`] used as both route
    /// table and URL resolver.
    ///
    /// Fails with [`HypermediaError::Config`] when a route has a blank name or
    /// the custom base URL is blank or malformed.
    pub fn from_config(config: &HypermediaConfig) -> Result<Self> {
        if let Some(position) = config.routes.iter().position(|r| r.name.trim().is_empty()) {
            return Err(HypermediaError::Config(format!(
                "route #{} has a blank name",
                position + 1
            )));
        }

        let mut builder = Self::new().with_routes(Arc::new(RouteRegistry::from_config(config)));

        builder = match &config.base_url {
            BaseUrlConfig::CurrentRequest => builder.with_current_request_base_url(),
            BaseUrlConfig::Custom { url } => builder
                .with_custom_base_url(url.as_str())
                .map_err(|e| HypermediaError::Config(format!("base_url: {}", e)))?,
            BaseUrlConfig::Empty => builder.with_empty_base_url(),
        };

        for enricher in &config.enrichers {
            builder = match enricher {
                EnricherKind::HttpMethod => builder.with_http_method_enricher(),
                EnricherKind::Templated => builder.with_enricher(IsTemplatedEnricher),
            };
        }

        builder = match config.link_factory {
            LinkFactoryKind::Basic => builder.with_link_factory(DefaultLinkFactory),
            LinkFactoryKind::Http => builder.with_http_links(),
        };

        Ok(builder)
    }

    /// Use a route registry as both route table and URL resolver
    pub fn with_routes(mut self, routes: Arc<RouteRegistry>) -> Self {
        self.routes = Some(routes.clone());
        self.resolver = Some(routes);
        self
    }

    /// Set the route table
    pub fn with_route_table(mut self, routes: Arc<dyn RouteTable>) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Set the URL resolver
    pub fn with_url_resolver(mut self, resolver: Arc<dyn UrlResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Replace the route-based path provider
    pub fn with_path_provider(mut self, provider: impl UrlPathProvider + 'static) -> Self {
        self.path_provider = Some(Arc::new(provider));
        self
    }

    pub fn with_base_url_provider(mut self, provider: impl BaseUrlProvider + 'static) -> Self {
        self.base_url_provider = Arc::new(provider);
        self
    }

    pub fn with_current_request_base_url(self) -> Self {
        self.with_base_url_provider(CurrentRequestBaseUrlProvider)
    }

    /// Use a fixed base URL; fails if it is blank or malformed
    pub fn with_custom_base_url(self, base_url: impl Into<String>) -> Result<Self> {
        Ok(self.with_base_url_provider(CustomBaseUrlProvider::new(base_url)?))
    }

    pub fn with_empty_base_url(self) -> Self {
        self.with_base_url_provider(EmptyBaseUrlProvider)
    }

    /// Append an enricher; enrichers run in the order they are added
    pub fn with_enricher(mut self, enricher: impl LinkDataEnricher + 'static) -> Self {
        self.enrichers.push(EnricherSlot::Custom(Arc::new(enricher)));
        self
    }

    /// Append the HTTP method enricher, bound to the route table at build time
    pub fn with_http_method_enricher(mut self) -> Self {
        self.enrichers.push(EnricherSlot::HttpMethod);
        self
    }

    pub fn with_link_factory(mut self, factory: impl LinkFactory + 'static) -> Self {
        self.factory = Arc::new(factory);
        self
    }

    /// Produce [`HttpLink`](crate::core::HttpLink)s
    pub fn with_http_links(self) -> Self {
        self.with_link_factory(HttpLinkFactory)
    }

    /// Build the service
    ///
    /// Fails when no route table was set.
    pub fn build(self) -> Result<HypermediaService> {
        let routes = self.routes.ok_or_else(|| {
            HypermediaError::invalid_argument(
                "routes",
                "a route table is required. Call .with_routes() or .with_route_table()",
            )
        })?;

        let path_provider = match self.path_provider {
            Some(provider) => provider,
            None => {
                let resolver = self.resolver.ok_or_else(|| {
                    HypermediaError::invalid_argument(
                        "resolver",
                        "a URL resolver is required. Call .with_routes() or .with_url_resolver()",
                    )
                })?;
                Arc::new(RoutePathProvider::new(routes.clone(), resolver))
            }
        };

        let enrichers = self
            .enrichers
            .into_iter()
            .map(|slot| match slot {
                EnricherSlot::HttpMethod => {
                    Arc::new(HttpMethodEnricher::new(routes.clone())) as Arc<dyn LinkDataEnricher>
                }
                EnricherSlot::Custom(enricher) => enricher,
            })
            .collect();

        Ok(HypermediaService::new(
            routes,
            self.base_url_provider,
            path_provider,
            enrichers,
            self.factory,
        ))
    }
}

impl Default for HypermediaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extractors::RequestContext;
    use crate::core::route::RouteDescriptor;
    use serde_json::json;

    fn routes() -> Arc<RouteRegistry> {
        Arc::new(RouteRegistry::new(vec![
            RouteDescriptor::new("Person", "/person/{id}").with_method("GET"),
        ]))
    }

    #[test]
    fn test_build_requires_routes() {
        assert!(HypermediaBuilder::new().build().is_err());
    }

    #[test]
    fn test_build_requires_resolver() {
        let result = HypermediaBuilder::new().with_route_table(routes()).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_base_url_validated() {
        assert!(HypermediaBuilder::new().with_custom_base_url("").is_err());
    }

    #[test]
    fn test_defaults_produce_basic_links() {
        let service = HypermediaBuilder::new().with_routes(routes()).build().unwrap();
        let context = RequestContext::new("https", "api.example.com");
        let link = service
            .get_route_link(&context, Some("Person"), Some(json!({ "id": 3 })))
            .unwrap();
        assert_eq!(link.href(), Some("https://api.example.com/person/3"));
        assert_eq!(link.method(), None);
    }

    #[test]
    fn test_http_method_enricher_bound_after_routes() {
        let service = HypermediaBuilder::new()
            .with_http_method_enricher()
            .with_http_links()
            .with_empty_base_url()
            .with_routes(routes())
            .build()
            .unwrap();
        let link = service
            .get_route_link(&RequestContext::detached(), Some("Person"), Some(json!({ "id": 3 })))
            .unwrap();
        assert_eq!(link.href(), Some("/person/3"));
        assert_eq!(link.method(), Some("GET"));
    }

    #[test]
    fn test_from_config() {
        let config = HypermediaConfig::from_yaml_str(
            r#"
base_url:
  strategy: empty
link_factory: http
routes:
  - name: Person
    template: /person/{id}
    methods: [GET]
"#,
        )
        .unwrap();

        let service = HypermediaBuilder::from_config(&config).unwrap().build().unwrap();
        let link = service
            .get_link_for_key(&RequestContext::detached(), "Person|templated=true")
            .unwrap();
        assert_eq!(link.href(), Some("/person/{id}"));
        assert_eq!(link.method(), Some("GET"));
        assert!(link.is_templated());
    }

    #[test]
    fn test_from_config_rejects_bad_base_url() {
        let config = HypermediaConfig {
            base_url: BaseUrlConfig::Custom {
                url: "not a url".to_string(),
            },
            ..HypermediaConfig::default()
        };
        let err = HypermediaBuilder::from_config(&config).err().unwrap();
        assert!(matches!(err, HypermediaError::Config(_)));
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_from_config_rejects_blank_route_name() {
        let config = HypermediaConfig {
            routes: vec![
                RouteDescriptor::new("Person", "/person/{id}"),
                RouteDescriptor::new(" ", "/people"),
            ],
            ..HypermediaConfig::default()
        };
        match HypermediaBuilder::from_config(&config) {
            Err(HypermediaError::Config(message)) => assert!(message.contains("#2")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("blank route name accepted"),
        }
    }
}
