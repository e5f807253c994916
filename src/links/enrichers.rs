//! Link data enrichers
//!
//! Enrichers add metadata to the link factory context without touching the
//! URL. They run in registration order against one shared writer; a later
//! write to the same key replaces an earlier one.

use crate::core::context::{HTTP_METHOD_KEY, LinkDataWriter, TEMPLATED_KEY};
use crate::core::error::Result;
use crate::core::request::LinkRequest;
use crate::core::route::RouteTable;
use std::sync::Arc;

/// Adds data about a link to the factory context
pub trait LinkDataEnricher: Send + Sync {
    /// Inspect `request` and write any extra data through `writer`
    fn enrich(&self, request: &LinkRequest, writer: &mut LinkDataWriter<'_>) -> Result<()>;
}

/// Writes the first HTTP method declared by the target route
#[derive(Clone)]
pub struct HttpMethodEnricher {
    routes: Arc<dyn RouteTable>,
}

impl HttpMethodEnricher {
    pub fn new(routes: Arc<dyn RouteTable>) -> Self {
        Self { routes }
    }
}

impl LinkDataEnricher for HttpMethodEnricher {
    fn enrich(&self, request: &LinkRequest, writer: &mut LinkDataWriter<'_>) -> Result<()> {
        let method = request
            .route_name()
            .and_then(|name| self.routes.lookup(name))
            .and_then(|route| route.primary_method());

        if let Some(method) = method {
            writer.write(HTTP_METHOD_KEY, method)?;
        }
        Ok(())
    }
}

/// Writes `templated = true` for templated requests, nothing otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct IsTemplatedEnricher;

impl LinkDataEnricher for IsTemplatedEnricher {
    fn enrich(&self, request: &LinkRequest, writer: &mut LinkDataWriter<'_>) -> Result<()> {
        if request.is_templated() {
            writer.write(TEMPLATED_KEY, true)?;
        }
        Ok(())
    }
}
