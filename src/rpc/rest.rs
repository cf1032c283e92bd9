//! HTTP plugin: endpoint resolution and route registration.
//!
//! Other plugins register their handlers' routes on the shared
//! [`HttpHandlers`] table during init. Serving requests is left to the
//! transport the host plugs in; this plugin only owns the endpoint and the
//! routes.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::HttpConfig;
use crate::di::FromContext;
use crate::error::PluginError;
use crate::infra::PluginInfraDeps;
use crate::logging::PluginLogger;
use crate::plugin::{Plugin, PluginName};

/// A registered handler route.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Route {
    pub method: String,
    pub path: String,
}

/// Shared route table of the HTTP plugin.
#[derive(Debug, Clone, Default)]
pub struct HttpHandlers {
    routes: Arc<RwLock<BTreeSet<Route>>>,
}

impl HttpHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route; the same method and path may only be taken once.
    pub fn register(&self, method: &str, path: &str) -> Result<(), PluginError> {
        let route = Route {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
        };
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);

        if routes.contains(&route) {
            return Err(PluginError::RouteConflict {
                method: route.method,
                path: route.path,
            });
        }

        tracing::debug!(method = %route.method, path = %route.path, "Registered HTTP route");
        routes.insert(route);
        Ok(())
    }

    /// Removes a route. Returns false if it was not registered.
    pub fn unregister(&self, method: &str, path: &str) -> bool {
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        routes.remove(&Route {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
        })
    }

    /// Registered routes, ordered by method then path.
    pub fn routes(&self) -> Vec<Route> {
        let routes = self.routes.read().unwrap_or_else(PoisonError::into_inner);
        routes.iter().cloned().collect()
    }
}

#[derive(FromContext, Debug, Clone)]
#[from_context(Context = "PluginInfraDeps")]
pub struct Deps {
    pub plugin_name: PluginName,
    pub log: PluginLogger,
}

/// The `http` plugin.
#[derive(Debug)]
pub struct HttpPlugin {
    pub deps: Option<Deps>,
    config: HttpConfig,
    handlers: HttpHandlers,
    endpoint: Option<String>,
}

impl HttpPlugin {
    pub fn new(config: HttpConfig) -> Self {
        Self {
            deps: None,
            config,
            handlers: HttpHandlers::new(),
            endpoint: None,
        }
    }

    /// Route table shared with plugins that expose handlers.
    pub fn handlers(&self) -> &HttpHandlers {
        &self.handlers
    }

    /// `host:port`, available once the plugin is initialized.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

impl Plugin for HttpPlugin {
    fn init(&mut self) -> Result<(), PluginError> {
        let deps = self.deps.as_ref().ok_or(PluginError::MissingDeps("http"))?;
        let _span = deps.log.span().enter();

        if self.config.port == 0 {
            return Err(PluginError::InvalidConfig(
                "http port must be non-zero".to_string(),
            ));
        }

        let endpoint = format!("{}:{}", self.config.host, self.config.port);
        tracing::info!(endpoint = %endpoint, "HTTP endpoint configured");
        self.endpoint = Some(endpoint);
        Ok(())
    }

    fn after_init(&mut self) -> Result<(), PluginError> {
        tracing::info!(
            endpoint = ?self.endpoint,
            routes = self.handlers.routes().len(),
            "HTTP routes registered"
        );
        Ok(())
    }

    fn close(&mut self) -> Result<(), PluginError> {
        self.endpoint = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_duplicate_route() {
        let handlers = HttpHandlers::new();
        handlers.register("get", "/liveness").unwrap();

        let err = handlers.register("GET", "/liveness").unwrap_err();
        assert!(matches!(err, PluginError::RouteConflict { .. }));
        assert_eq!(err.to_string(), "Route already registered: GET /liveness");

        handlers.register("POST", "/liveness").unwrap();
        assert_eq!(handlers.routes().len(), 2);
    }

    #[test]
    fn test_init_requires_deps() {
        let mut plugin = HttpPlugin::new(HttpConfig::default());
        assert!(matches!(plugin.init(), Err(PluginError::MissingDeps("http"))));
        assert!(plugin.endpoint().is_none());
    }
}
