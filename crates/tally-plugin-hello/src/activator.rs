//! Plugin bootstrap.
//!
//! [`HelloActivator`] owns the construct-and-register sequence the host
//! drives through its `start`/`stop` lifecycle hooks. The service registry
//! and event dispatcher are injected through the constructor, so tests can
//! substitute fakes for the host's own instances.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use tally_host::{
    EventDispatcher, EventListener, Healthcheck, HostError, HostResult, HttpHandler, LogLevel,
    LogSink, LoggerFactory, PaymentCapability, PropertyBag, ServiceRegistry, plugin_properties,
    region,
};

use crate::PLUGIN_NAME;
use crate::config::ConfigHandler;
use crate::listener::HelloListener;
use crate::metrics::MetricsGenerator;
use crate::payment::HelloPaymentCapability;
use crate::probe::HelloHealthcheck;
use crate::servlet::HelloServlet;

/// Region used when the host property bag names none.
const DEFAULT_REGION: &str = "global";

/// Bootstrap for the hello plugin.
///
/// `start` constructs every component in a fixed order and registers each
/// with the host's service registry under [`PLUGIN_NAME`]; `stop` stops
/// the metrics generator and defers service unregistration to the host's
/// own teardown. The host calls each hook once, never concurrently.
pub struct HelloActivator {
    registry: Arc<ServiceRegistry>,
    dispatcher: Arc<EventDispatcher>,
    metrics: MetricsGenerator,
    config: Mutex<Option<Arc<ConfigHandler>>>,
    started: Mutex<bool>,
}

impl HelloActivator {
    /// Creates an activator bound to the given host registry and
    /// dispatcher.
    pub fn new(registry: Arc<ServiceRegistry>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            registry,
            dispatcher,
            metrics: MetricsGenerator::new(),
            config: Mutex::new(None),
            started: Mutex::new(false),
        }
    }

    /// Starts the plugin.
    ///
    /// A missing logging factory or sink aborts startup with
    /// [`HostError::ServiceNotFound`] before anything is registered: the
    /// environment is unusable and there is no retry.
    pub async fn start(&self, properties: &PropertyBag) -> HostResult<()> {
        if *self.started.lock() {
            warn!(plugin = PLUGIN_NAME, "Plugin is already started");
            return Ok(());
        }

        // Required host services, resolved before any registration so a
        // failed start leaves the registry untouched.
        let logger_factory = self
            .registry
            .lookup_any::<dyn LoggerFactory>()
            .ok_or(HostError::ServiceNotFound("LoggerFactory"))?;
        let log_sink = self
            .registry
            .lookup_any::<dyn LogSink>()
            .ok_or(HostError::ServiceNotFound("LogSink"))?;

        let region = region(properties).unwrap_or(DEFAULT_REGION);
        let config = Arc::new(ConfigHandler::new(PLUGIN_NAME, region));
        config.apply_properties(properties);

        let listener = Arc::new(HelloListener);

        let payment: Arc<dyn PaymentCapability> = Arc::new(HelloPaymentCapability);
        self.registry
            .register(payment, plugin_properties(PLUGIN_NAME))?;

        self.metrics.start();

        let healthcheck: Arc<dyn Healthcheck> = Arc::new(HelloHealthcheck);
        self.registry
            .register(healthcheck, plugin_properties(PLUGIN_NAME))?;

        log_sink.log(LogLevel::Info, PLUGIN_NAME, "host log sink resolved");
        let logger = logger_factory.logger(PLUGIN_NAME);

        let servlet: Arc<dyn HttpHandler> =
            Arc::new(HelloServlet::new(logger, Arc::clone(&config)));
        self.registry
            .register(servlet, plugin_properties(PLUGIN_NAME))?;

        // Event handlers are registered last, after every service.
        self.dispatcher
            .register(Arc::clone(&config) as Arc<dyn EventListener>);
        self.dispatcher.register(listener);

        *self.config.lock() = Some(config);
        *self.started.lock() = true;

        info!(plugin = PLUGIN_NAME, region = %region, "Plugin started");
        Ok(())
    }

    /// Stops the plugin.
    ///
    /// Only the metrics generator needs explicit teardown; unregistering
    /// the plugin's services is the host's bundle teardown.
    pub async fn stop(&self) {
        if self.metrics.stop() {
            info!(plugin = PLUGIN_NAME, "Metrics generator stopped");
        }
        *self.started.lock() = false;
        info!(plugin = PLUGIN_NAME, "Plugin stopped");
    }

    /// The live configuration handler, once started.
    pub fn config_handler(&self) -> Option<Arc<ConfigHandler>> {
        self.config.lock().clone()
    }

    /// Whether [`start`](Self::start) has completed successfully.
    pub fn is_started(&self) -> bool {
        *self.started.lock()
    }
}
