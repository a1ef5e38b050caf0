//! # Tally Hello Plugin
//!
//! A minimal example plugin for the Tally billing platform. It
//! demonstrates the full registration surface at the smallest useful
//! scale:
//!
//! - a payment capability stub reporting every operation as unsupported
//! - a health probe that always reports healthy
//! - an HTTP handler greeting through the host's logging capability and
//!   reading the optional tenant identity
//! - a metrics generator ticking a counter in the shared metrics registry
//! - a region-scoped configuration value replaced on configuration events
//!
//! [`HelloActivator`] wires everything to an explicitly injected
//! [`ServiceRegistry`](tally_host::ServiceRegistry) and
//! [`EventDispatcher`](tally_host::EventDispatcher) through the host's
//! `start`/`stop` lifecycle hooks.

pub mod activator;
pub mod config;
pub mod listener;
pub mod metrics;
pub mod payment;
pub mod probe;
pub mod servlet;

pub use activator::HelloActivator;
pub use config::{ConfigHandler, HelloConfig};
pub use listener::HelloListener;
pub use metrics::MetricsGenerator;
pub use payment::HelloPaymentCapability;
pub use probe::HelloHealthcheck;
pub use servlet::HelloServlet;

/// Name this plugin registers its services under.
///
/// Ideally matches the plugin's name on the filesystem, but nothing
/// enforces that.
pub const PLUGIN_NAME: &str = "hello-plugin";
