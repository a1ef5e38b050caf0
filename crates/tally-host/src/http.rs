//! Plugin HTTP surface.
//!
//! The host owns routing: a plugin registers one [`HttpHandler`] and the
//! host invokes it for requests under the plugin's routing prefix. When
//! the caller supplied the credential header pair, the host resolves it
//! into a [`Tenant`] and attaches it to the request before dispatch.

use async_trait::async_trait;

use crate::tenant::Tenant;

/// HTTP method of a routed request.
///
/// Only the methods the plugin surface uses are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// A request routed to a plugin handler.
#[derive(Debug, Clone)]
pub struct PluginHttpRequest {
    pub method: HttpMethod,
    /// Path below the plugin's routing prefix.
    pub path: String,
    /// Caller identity, when the host could resolve one.
    pub tenant: Option<Tenant>,
}

impl PluginHttpRequest {
    /// A GET request for `path` with no tenant attached.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            tenant: None,
        }
    }

    /// Attaches a resolved tenant identity.
    pub fn with_tenant(mut self, tenant: Tenant) -> Self {
        self.tenant = Some(tenant);
        self
    }
}

/// Response returned from a plugin handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginHttpResponse {
    pub status: u16,
    pub body: Option<String>,
}

impl PluginHttpResponse {
    /// 200 with an empty body.
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }
}

/// Routable request handler a plugin registers with the host.
#[async_trait]
pub trait HttpHandler: Send + Sync {
    async fn handle(&self, request: PluginHttpRequest) -> PluginHttpResponse;
}
