//! Link factories turning an enriched context into a link value

use crate::core::context::{HTTP_METHOD_KEY, LinkFactoryContext, TEMPLATED_KEY};
use crate::core::error::Result;
use crate::core::link::{HttpLink, Link, LinkMapper, LinkValue};

/// Builds the final link from a fully populated context
///
/// Implement this to give links a custom shape.
pub trait LinkFactory: Send + Sync {
    fn create(&self, context: &LinkFactoryContext) -> Result<LinkValue>;
}

/// Produces a [`Link`] holding only the href
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLinkFactory;

impl LinkFactory for DefaultLinkFactory {
    fn create(&self, context: &LinkFactoryContext) -> Result<LinkValue> {
        Ok(Link::new(context.href()).into())
    }
}

/// Produces an [`HttpLink`] with the method and templated flag of the route
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpLinkFactory;

impl LinkFactory for HttpLinkFactory {
    fn create(&self, context: &LinkFactoryContext) -> Result<LinkValue> {
        let method = context.get_as::<String>(HTTP_METHOD_KEY)?;

        let link = LinkMapper::new(context, HttpLink::new(context.href(), method))
            .map_if_existing::<bool, _>(TEMPLATED_KEY, |link, templated| {
                if templated {
                    link.templated = Some(true);
                }
            })?
            .into_link();

        Ok(link.into())
    }
}
