//! HTTP handler for the plugin's routing prefix.

use std::sync::Arc;

use async_trait::async_trait;

use tally_host::{HttpHandler, PluginHttpRequest, PluginHttpResponse, PluginLogger};

use crate::config::ConfigHandler;

/// Handler for `GET /` under the plugin's routing prefix.
///
/// Logs the configured greeting through the logger resolved from the
/// host's logging capability, then one line for the tenant identity the
/// host attached to the request — its identifier when present, an absence
/// note otherwise. No response body, no error path.
pub struct HelloServlet {
    logger: PluginLogger,
    config: Arc<ConfigHandler>,
}

impl HelloServlet {
    pub fn new(logger: PluginLogger, config: Arc<ConfigHandler>) -> Self {
        Self { logger, config }
    }
}

#[async_trait]
impl HttpHandler for HelloServlet {
    async fn handle(&self, request: PluginHttpRequest) -> PluginHttpResponse {
        self.logger.info(&self.config.current().greeting);

        match &request.tenant {
            Some(tenant) => self.logger.info(&format!("tenant id: {tenant}")),
            None => self.logger.info("tenant is not available"),
        }

        PluginHttpResponse::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_host::{LogSink, MemoryLogSink, SinkLoggerFactory, LoggerFactory, Tenant};

    fn servlet_with_sink() -> (HelloServlet, Arc<MemoryLogSink>) {
        let sink = Arc::new(MemoryLogSink::new());
        let factory = SinkLoggerFactory::new(Arc::clone(&sink) as Arc<dyn LogSink>);
        let config = Arc::new(ConfigHandler::new(crate::PLUGIN_NAME, "us-east-1"));
        let servlet = HelloServlet::new(factory.logger(crate::PLUGIN_NAME), config);
        (servlet, sink)
    }

    #[tokio::test]
    async fn test_logs_tenant_id_when_present() {
        let (servlet, sink) = servlet_with_sink();
        let request = PluginHttpRequest::get("/").with_tenant(Tenant::new("T-123"));

        let response = servlet.handle(request).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body, None);
        assert!(sink.contains("T-123"));
        assert!(!sink.contains("tenant is not available"));
    }

    #[tokio::test]
    async fn test_logs_absence_when_no_tenant() {
        let (servlet, sink) = servlet_with_sink();

        servlet.handle(PluginHttpRequest::get("/")).await;

        assert!(sink.contains("tenant is not available"));
        assert!(!sink.contains("tenant id:"));
    }

    #[tokio::test]
    async fn test_greeting_follows_config_replacement() {
        let sink = Arc::new(MemoryLogSink::new());
        let factory = SinkLoggerFactory::new(Arc::clone(&sink) as Arc<dyn LogSink>);
        let config = Arc::new(ConfigHandler::new(crate::PLUGIN_NAME, "us-east-1"));
        let servlet = HelloServlet::new(factory.logger(crate::PLUGIN_NAME), Arc::clone(&config));

        config.replace(crate::HelloConfig {
            greeting: "ahoy".to_string(),
        });
        servlet.handle(PluginHttpRequest::get("/")).await;

        assert!(sink.contains("ahoy"));
    }
}
