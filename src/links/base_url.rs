//! Base URL strategies
//!
//! The base URL is the `scheme://host` prefix of every href. Which strategy
//! is active is decided once, at composition time.

use crate::core::RequestContext;
use crate::core::error::{HypermediaError, Result};
use crate::core::uri;

/// Supplies the href prefix for a request
pub trait BaseUrlProvider: Send + Sync {
    /// Base URL for links built against `request`; `None` when unavailable
    fn base_url(&self, request: &RequestContext) -> Option<String>;
}

/// Uses the scheme and host of the current request
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentRequestBaseUrlProvider;

impl BaseUrlProvider for CurrentRequestBaseUrlProvider {
    fn base_url(&self, request: &RequestContext) -> Option<String> {
        request.origin()
    }
}

/// Uses a fixed URL supplied at configuration time
#[derive(Debug, Clone)]
pub struct CustomBaseUrlProvider {
    base_url: String,
}

impl CustomBaseUrlProvider {
    /// Create a provider for `base_url`
    ///
    /// Blank or malformed URLs are rejected immediately.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(HypermediaError::invalid_argument(
                "baseUrl",
                "base URL must not be blank",
            ));
        }
        if !uri::is_well_formed(&base_url) {
            return Err(HypermediaError::invalid_argument(
                "baseUrl",
                format!("'{}' is not a well-formed URI", base_url),
            ));
        }
        Ok(Self { base_url })
    }
}

impl BaseUrlProvider for CustomBaseUrlProvider {
    fn base_url(&self, _request: &RequestContext) -> Option<String> {
        Some(self.base_url.clone())
    }
}

/// Produces host-relative hrefs
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyBaseUrlProvider;

impl BaseUrlProvider for EmptyBaseUrlProvider {
    fn base_url(&self, _request: &RequestContext) -> Option<String> {
        Some(String::new())
    }
}
