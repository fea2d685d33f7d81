use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HOST, request::Parts, HeaderMap, Uri},
};

use super::{routes::EightbotRoute, server_environment::ServerEnvironment};

/// The scheme, host, and port that a request was addressed to.
///
/// This lets the server build urls that point back at itself regardless of how it's deployed.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RequestOrigin {
    scheme: String,
    authority: String,
}

impl RequestOrigin {
    /// Creates an origin, dropping the port from `authority` if it is the default for `scheme`.
    pub fn new(scheme: &str, authority: &str) -> Self {
        let default_port = match scheme {
            "https" => Some(":443"),
            "http" => Some(":80"),
            _ => None,
        };
        let authority = default_port
            .and_then(|port| authority.strip_suffix(port))
            .unwrap_or(authority);
        Self {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
        }
    }

    /// Resolves the origin of a request.
    ///
    /// An absolute uri supplies both the scheme and the host, overriding the `Host` header.
    /// Otherwise the scheme is `default_scheme`, and the host comes from the `Host` header, then
    /// `local_address`.
    pub fn resolve(
        headers: &HeaderMap,
        uri: &Uri,
        default_scheme: &str,
        local_address: SocketAddr,
    ) -> Self {
        let scheme = uri.scheme_str().unwrap_or(default_scheme);
        let uri_authority = uri.scheme().and(uri.authority()).map(|a| a.as_str());
        let host_header = || headers.get(HOST).and_then(|value| value.to_str().ok());
        match uri_authority.or_else(host_header) {
            Some(authority) => Self::new(scheme, authority),
            None => Self::new(scheme, &local_address.to_string()),
        }
    }

    pub fn url(&self, route: EightbotRoute) -> String {
        format!("{}://{}{}", self.scheme, self.authority, route.path())
    }

    pub fn icon_url(&self) -> String {
        self.url(EightbotRoute::Icon)
    }
}

#[async_trait]
impl FromRequestParts<Arc<ServerEnvironment>> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        environment: &Arc<ServerEnvironment>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::resolve(
            &parts.headers,
            &parts.uri,
            environment.transport().scheme(),
            environment.address(),
        ))
    }
}
