//! Region-scoped plugin configuration.

use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tally_host::{EventListener, HostEvent, PropertyBag};

/// Configuration values for the hello plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloConfig {
    /// Greeting the HTTP handler logs on each request.
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for HelloConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
        }
    }
}

fn default_greeting() -> String {
    "hello world".to_string()
}

impl HelloConfig {
    /// Default configuration variant for a deployment region.
    pub fn default_for_region(region: &str) -> Self {
        Self {
            greeting: format!("hello world from {region}"),
        }
    }

    /// Reads recognized keys out of a host property bag, falling back to
    /// `base` for anything absent.
    fn from_properties(base: &HelloConfig, properties: &PropertyBag) -> Self {
        Self {
            greeting: properties
                .get("greeting")
                .cloned()
                .unwrap_or_else(|| base.greeting.clone()),
        }
    }
}

/// Holds the plugin's live configuration value.
///
/// Single writer, many readers: the value is replaced wholesale via
/// [`replace`](Self::replace), never mutated in place, so a reader always
/// observes a complete configuration — there is no lock to take on the
/// read path.
pub struct ConfigHandler {
    plugin_name: String,
    region: String,
    current: ArcSwap<HelloConfig>,
}

impl ConfigHandler {
    /// Creates a handler holding the default configuration for `region`.
    pub fn new(plugin_name: impl Into<String>, region: impl Into<String>) -> Self {
        let region = region.into();
        let current = ArcSwap::from_pointee(HelloConfig::default_for_region(&region));
        Self {
            plugin_name: plugin_name.into(),
            region,
            current,
        }
    }

    /// The deployment region this handler was created for.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The live configuration.
    pub fn current(&self) -> Arc<HelloConfig> {
        self.current.load_full()
    }

    /// Replaces the held configuration wholesale.
    pub fn replace(&self, config: HelloConfig) {
        self.current.store(Arc::new(config));
        info!(plugin = %self.plugin_name, "Configuration replaced");
    }

    /// Parses a host property bag against the current value and replaces.
    pub fn apply_properties(&self, properties: &PropertyBag) {
        let next = HelloConfig::from_properties(&self.current(), properties);
        self.replace(next);
    }
}

#[async_trait]
impl EventListener for ConfigHandler {
    async fn on_event(&self, event: &HostEvent) {
        if let HostEvent::ConfigurationChanged {
            plugin_name,
            properties,
        } = event
        {
            if plugin_name == &self.plugin_name {
                self.apply_properties(properties);
            } else {
                debug!(
                    plugin = %plugin_name,
                    "Ignoring configuration event for another plugin"
                );
            }
        }
    }
}
