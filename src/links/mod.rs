//! Link generation pipeline
//!
//! This module provides the providers, enrichers and factories that turn a
//! link request into a link, the service orchestrating them, and the
//! in-process route registry they read from.

pub mod base_url;
pub mod document;
pub mod enrichers;
pub mod factory;
pub mod path;
pub mod registry;
pub mod service;

pub use base_url::{
    BaseUrlProvider, CurrentRequestBaseUrlProvider, CustomBaseUrlProvider, EmptyBaseUrlProvider,
};
pub use document::{LinkContainer, Links, Resource, SELF_REL};
pub use enrichers::{HttpMethodEnricher, IsTemplatedEnricher, LinkDataEnricher};
pub use factory::{DefaultLinkFactory, HttpLinkFactory, LinkFactory};
pub use path::{RoutePathProvider, UrlPathProvider};
pub use registry::RouteRegistry;
pub use service::HypermediaService;
