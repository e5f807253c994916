//! Core module containing the value types and capabilities of link generation

pub mod context;
pub mod error;
pub mod extractors;
pub mod key;
pub mod link;
pub mod request;
pub mod route;
pub mod uri;

pub use context::{ContextValue, FromContextValue, LinkDataWriter, LinkFactoryContext};
pub use error::{HypermediaError, ParseError, Result};
pub use extractors::RequestContext;
pub use link::{HttpLink, Link, LinkMapper, LinkValue};
pub use request::{LinkRequest, LinkRequestBuilder};
pub use route::{QueryProperty, RouteDescriptor, RouteTable, UrlResolver};
