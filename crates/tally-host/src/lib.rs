//! # Tally Host API
//!
//! Host-side surface of the Tally billing platform's extensibility
//! framework — the pieces a plugin is written against:
//!
//! - **Service registry**: registration-by-key service lookup
//!   ([`ServiceRegistry`])
//! - **Capabilities**: payment processing ([`PaymentCapability`]), health
//!   probing ([`Healthcheck`]), HTTP handling ([`HttpHandler`])
//! - **Events**: domain events and listener dispatch ([`EventDispatcher`])
//! - **Logging**: the host's log sink and named-logger factory
//!   ([`LogSink`], [`LoggerFactory`])
//!
//! The real platform implements this surface inside the host process; this
//! crate models it so plugins (and their tests) run against an explicitly
//! injected registry instead of ambient lookup.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tally_host::{ServiceRegistry, SinkLoggerFactory, TracingLogSink, plugin_properties};
//!
//! let registry = Arc::new(ServiceRegistry::new());
//! let sink: Arc<dyn tally_host::LogSink> = Arc::new(TracingLogSink);
//! let factory = Arc::new(SinkLoggerFactory::new(Arc::clone(&sink)));
//! registry.register(sink, plugin_properties("tally-core"))?;
//! registry.register(factory as Arc<dyn tally_host::LoggerFactory>, plugin_properties("tally-core"))?;
//! ```

pub mod error;
pub mod event;
pub mod health;
pub mod http;
pub mod logging;
pub mod payment;
pub mod properties;
pub mod registry;
pub mod tenant;

pub use error::{HostError, HostResult};
pub use event::{EventDispatcher, EventListener, HostEvent};
pub use health::{HealthStatus, Healthcheck};
pub use http::{HttpHandler, HttpMethod, PluginHttpRequest, PluginHttpResponse};
pub use logging::{
    LogLevel, LogSink, LoggerFactory, MemoryLogSink, PluginLogger, SinkLoggerFactory,
    TracingLogSink,
};
pub use payment::{PaymentCapability, PaymentOutcome, PaymentRequest, PaymentTransaction};
pub use properties::{
    PLUGIN_NAME_PROP, PropertyBag, REGION_PROP, ServiceProperties, plugin_properties, region,
};
pub use registry::ServiceRegistry;
pub use tenant::Tenant;
