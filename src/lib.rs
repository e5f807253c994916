//! # Hypermedia-RS
//!
//! HATEOAS link generation for REST APIs, driven by the route table instead of
//! hand-built URL strings.
//!
//! ## Features
//!
//! - **Route-Based URLs**: Links are resolved from named routes and their values
//! - **URI Templates**: `templated=true` requests return `/person/{id}{?page}` style hrefs
//! - **Pluggable Enrichers**: Ordered enrichers add the HTTP method and templated flag
//! - **Custom Link Shapes**: Link factories read the enriched context into any link type
//! - **Compact Link Keys**: `Person|templated=true` describes a link in one string
//! - **Configuration-Based**: Select strategies and declare routes via YAML
//! - **Axum Integration**: Extract the request context and return typed errors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hypermedia::prelude::*;
//!
//! let service = HypermediaBuilder::from_config(&HypermediaConfig::from_yaml_file("links.yaml")?)?
//!     .build()?;
//!
//! async fn get_person(
//!     State(service): State<HypermediaService>,
//!     context: RequestContext,
//!     Path(id): Path<u32>,
//! ) -> Result<Json<Resource<Person>>, HypermediaError> {
//!     let mut resource = Resource::new(load_person(id));
//!     resource
//!         .add_self_route_link(&service, &context, Some(json!({ "id": id })))?
//!         .add_route_link(&service, &context, "people", "People", None)?;
//!     Ok(Json(resource))
//! }
//! ```

pub mod config;
pub mod core;
pub mod links;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        context::{ContextValue, FromContextValue, LinkDataWriter, LinkFactoryContext},
        error::{HypermediaError, ParseError, Result},
        extractors::RequestContext,
        link::{HttpLink, Link, LinkMapper, LinkValue},
        request::{LinkRequest, LinkRequestBuilder},
        route::{QueryProperty, RouteDescriptor, RouteTable, UrlResolver},
    };

    // === Pipeline ===
    pub use crate::links::{
        BaseUrlProvider, CurrentRequestBaseUrlProvider, CustomBaseUrlProvider,
        DefaultLinkFactory, EmptyBaseUrlProvider, HttpLinkFactory, HttpMethodEnricher,
        HypermediaService, IsTemplatedEnricher, LinkContainer, LinkDataEnricher, LinkFactory,
        Links, Resource, RouteRegistry, RoutePathProvider, SELF_REL, UrlPathProvider,
    };

    // === Config ===
    pub use crate::config::{BaseUrlConfig, EnricherKind, HypermediaConfig, LinkFactoryKind};

    // === Server ===
    pub use crate::server::HypermediaBuilder;

    // === External dependencies ===
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};

    // === Axum ===
    pub use axum::{
        Json, Router,
        extract::{Path, State},
        routing::get,
    };
}
