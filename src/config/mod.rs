//! Configuration loading and management
//!
//! A configuration selects the base URL strategy, the enrichers (in order),
//! the link factory, and declares the route table:
//!
//! ```yaml
//! base_url:
//!   strategy: custom
//!   url: https://api.example.com
//! enrichers: [http_method, templated]
//! link_factory: http
//! routes:
//!   - name: Person
//!     template: /person/{id}
//!     methods: [GET]
//!   - name: People
//!     template: /people
//!     methods: [GET, POST]
//!     query:
//!       - name: page
//!       - name: page_size
//!         alternate_names: [pageSize]
//! ```

use crate::core::route::RouteDescriptor;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Where the href prefix comes from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum BaseUrlConfig {
    /// Scheme and host of the inbound request
    #[default]
    CurrentRequest,
    /// A fixed URL
    Custom { url: String },
    /// No prefix, hrefs are host-relative
    Empty,
}

/// Built-in link data enrichers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnricherKind {
    /// Adds the first HTTP method of the route
    HttpMethod,
    /// Adds `templated: true` for templated requests
    Templated,
}

/// Built-in link factories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinkFactoryKind {
    /// Links with an href only
    Basic,
    /// Links with href, method and templated flag
    #[default]
    Http,
}

fn default_enrichers() -> Vec<EnricherKind> {
    vec![EnricherKind::HttpMethod, EnricherKind::Templated]
}

/// Complete configuration for link generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HypermediaConfig {
    #[serde(default)]
    pub base_url: BaseUrlConfig,

    /// Enrichers, run in this order
    #[serde(default = "default_enrichers")]
    pub enrichers: Vec<EnricherKind>,

    #[serde(default)]
    pub link_factory: LinkFactoryKind,

    #[serde(default)]
    pub routes: Vec<RouteDescriptor>,
}

impl Default for HypermediaConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrlConfig::default(),
            enrichers: default_enrichers(),
            link_factory: LinkFactoryKind::default(),
            routes: Vec::new(),
        }
    }
}

impl HypermediaConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Find a route declaration by name
    pub fn find_route(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Merge multiple configurations into one
    ///
    /// Routes are concatenated; a later route with the same name replaces the
    /// earlier one in place. For the base URL, enrichers and link factory the
    /// last configuration that differs from the defaults wins.
    pub fn merge(configs: Vec<HypermediaConfig>) -> Self {
        let defaults = Self::default();
        let mut merged = Self::default();

        for config in configs {
            if config.base_url != defaults.base_url {
                merged.base_url = config.base_url;
            }
            if config.enrichers != defaults.enrichers {
                merged.enrichers = config.enrichers;
            }
            if config.link_factory != defaults.link_factory {
                merged.link_factory = config.link_factory;
            }

            for route in config.routes {
                match merged.routes.iter_mut().find(|existing| existing.name == route.name) {
                    Some(existing) => *existing = route,
                    None => merged.routes.push(route),
                }
            }
        }

        merged
    }
}
