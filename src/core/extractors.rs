//! Axum extractor for the request context links are built against
//!
//! Link generation needs to know the scheme and host the client used, and
//! which route is serving the current request. [`RequestContext`] carries
//! those values explicitly into every call instead of reading ambient state.

use axum::extract::{FromRequestParts, MatchedPath};
use axum::http::header::HOST;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Header set by reverse proxies to the original scheme
pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

/// Header set by reverse proxies to the original host
pub const FORWARDED_HOST_HEADER: &str = "x-forwarded-host";

const DEFAULT_SCHEME: &str = "http";

/// Scheme, host and current route of the inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// URL scheme (e.g., "https")
    pub scheme: String,

    /// Host with optional port (e.g., "api.example.com:8443")
    pub host: Option<String>,

    /// Name of the route serving the request, when known
    pub route_name: Option<String>,

    /// Route template matched by the router (e.g., "/person/{id}")
    pub matched_path: Option<String>,
}

impl RequestContext {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: Some(host.into()),
            route_name: None,
            matched_path: None,
        }
    }

    /// A context with no host, for links built outside a request
    pub fn detached() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: None,
            route_name: None,
            matched_path: None,
        }
    }

    pub fn with_route_name(mut self, route_name: impl Into<String>) -> Self {
        self.route_name = Some(route_name.into());
        self
    }

    pub fn with_matched_path(mut self, matched_path: impl Into<String>) -> Self {
        self.matched_path = Some(matched_path.into());
        self
    }

    /// `scheme://host`, or `None` without a host
    pub fn origin(&self) -> Option<String> {
        self.host
            .as_deref()
            .filter(|host| !host.trim().is_empty())
            .map(|host| format!("{}://{}", self.scheme, host))
    }

    /// Build the context from request parts
    pub fn from_parts(parts: &Parts) -> Self {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let scheme = header(FORWARDED_PROTO_HEADER)
            .or_else(|| parts.uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_SCHEME.to_string());

        let host = header(FORWARDED_HOST_HEADER)
            .or_else(|| header(HOST.as_str()))
            .or_else(|| parts.uri.authority().map(|authority| authority.to_string()));

        let matched_path = parts
            .extensions
            .get::<MatchedPath>()
            .map(|matched| matched.as_str().to_string());

        Self {
            scheme,
            host,
            route_name: None,
            matched_path,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::detached()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_host_header() {
        let parts = parts(
            Request::builder()
                .uri("/person/1")
                .header("host", "api.example.com")
                .body(())
                .unwrap(),
        );
        let context = RequestContext::from_parts(&parts);
        assert_eq!(context.scheme, "http");
        assert_eq!(context.origin(), Some("http://api.example.com".to_string()));
        assert_eq!(context.matched_path, None);
    }

    #[test]
    fn test_forwarded_headers_win() {
        let parts = parts(
            Request::builder()
                .uri("/person/1")
                .header("host", "internal:8080")
                .header(FORWARDED_PROTO_HEADER, "https")
                .header(FORWARDED_HOST_HEADER, "api.example.com, proxy.local")
                .body(())
                .unwrap(),
        );
        let context = RequestContext::from_parts(&parts);
        assert_eq!(context.origin(), Some("https://api.example.com".to_string()));
    }

    #[test]
    fn test_absolute_uri() {
        let parts = parts(
            Request::builder()
                .uri("https://api.example.com/person/1")
                .body(())
                .unwrap(),
        );
        let context = RequestContext::from_parts(&parts);
        assert_eq!(context.origin(), Some("https://api.example.com".to_string()));
    }

    #[test]
    fn test_detached_has_no_origin() {
        assert_eq!(RequestContext::detached().origin(), None);
    }
}
