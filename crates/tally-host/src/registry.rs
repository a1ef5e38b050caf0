//! Host service registry.
//!
//! The registry is the host's service-lookup mechanism: plugins register
//! capability implementations tagged with their own plugin name, and the
//! host routes work (payment calls, health polls, HTTP dispatch) to
//! whatever is registered. Keys combine the capability's `TypeId` with the
//! owning plugin's name, so the host can disambiguate multiple plugins
//! providing the same capability.
//!
//! Every registration carries a property map that must name its owner via
//! [`PLUGIN_NAME_PROP`]. Registering the same `(capability, plugin)` key
//! twice replaces the earlier instance — at most one instance per key.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::{HostError, HostResult};
use crate::properties::{PLUGIN_NAME_PROP, ServiceProperties};

/// One stored registration.
///
/// The boxed `dyn Any` holds the `Arc<S>` the service was registered
/// under; lookups downcast back to `Arc<S>` and clone it out.
struct Registration {
    properties: ServiceProperties,
    instance: Box<dyn Any + Send + Sync>,
}

/// Process-wide service registry shared between the host and its plugins.
pub struct ServiceRegistry {
    services: RwLock<HashMap<(TypeId, String), Registration>>,
}

impl ServiceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            services: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `instance` as the implementation of capability `S`.
    ///
    /// `properties` must carry [`PLUGIN_NAME_PROP`]; its value becomes part
    /// of the registration key. A previous registration under the same key
    /// is replaced.
    pub fn register<S>(&self, instance: Arc<S>, properties: ServiceProperties) -> HostResult<()>
    where
        S: ?Sized + 'static,
        Arc<S>: Send + Sync,
    {
        let plugin = properties
            .get(PLUGIN_NAME_PROP)
            .cloned()
            .ok_or(HostError::MissingPluginName)?;

        let replaced = self
            .services
            .write()
            .insert(
                (TypeId::of::<S>(), plugin.clone()),
                Registration {
                    properties,
                    instance: Box::new(instance),
                },
            )
            .is_some();

        if replaced {
            debug!(
                plugin = %plugin,
                capability = std::any::type_name::<S>(),
                "Previous registration replaced"
            );
        }
        info!(
            plugin = %plugin,
            capability = std::any::type_name::<S>(),
            "Service registered"
        );
        Ok(())
    }

    /// Returns the capability `S` registered by `plugin_name`, if any.
    pub fn lookup<S>(&self, plugin_name: &str) -> Option<Arc<S>>
    where
        S: ?Sized + 'static,
    {
        self.services
            .read()
            .get(&(TypeId::of::<S>(), plugin_name.to_string()))
            .and_then(|r| r.instance.downcast_ref::<Arc<S>>())
            .cloned()
    }

    /// Returns a registration of capability `S` regardless of the owning
    /// plugin.
    ///
    /// Host-provided services (the logging sink and logger factory) are
    /// resolved this way. When several plugins registered `S`, which one
    /// is returned is unspecified.
    pub fn lookup_any<S>(&self) -> Option<Arc<S>>
    where
        S: ?Sized + 'static,
    {
        let guard = self.services.read();
        guard
            .iter()
            .find(|((type_id, _), _)| *type_id == TypeId::of::<S>())
            .and_then(|(_, r)| r.instance.downcast_ref::<Arc<S>>())
            .cloned()
    }

    /// Removes the registration of `S` owned by `plugin_name`.
    ///
    /// Returns whether a registration was present.
    pub fn unregister<S>(&self, plugin_name: &str) -> bool
    where
        S: ?Sized + 'static,
    {
        let removed = self
            .services
            .write()
            .remove(&(TypeId::of::<S>(), plugin_name.to_string()))
            .is_some();
        if removed {
            info!(
                plugin = %plugin_name,
                capability = std::any::type_name::<S>(),
                "Service unregistered"
            );
        }
        removed
    }

    /// Number of registrations owned by `plugin_name`, across all
    /// capability types.
    pub fn registration_count(&self, plugin_name: &str) -> usize {
        self.services
            .read()
            .keys()
            .filter(|(_, owner)| owner == plugin_name)
            .count()
    }

    /// The property map of the `S` registration owned by `plugin_name`.
    pub fn properties_of<S>(&self, plugin_name: &str) -> Option<ServiceProperties>
    where
        S: ?Sized + 'static,
    {
        self.services
            .read()
            .get(&(TypeId::of::<S>(), plugin_name.to_string()))
            .map(|r| r.properties.clone())
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::plugin_properties;

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct EnglishGreeter;

    impl Greeter for EnglishGreeter {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    struct FrenchGreeter;

    impl Greeter for FrenchGreeter {
        fn greet(&self) -> &'static str {
            "bonjour"
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = ServiceRegistry::new();
        let greeter: Arc<dyn Greeter> = Arc::new(EnglishGreeter);
        registry
            .register(greeter, plugin_properties("demo"))
            .unwrap();

        let found = registry.lookup::<dyn Greeter>("demo").unwrap();
        assert_eq!(found.greet(), "hello");
        assert!(registry.lookup::<dyn Greeter>("other").is_none());
        assert_eq!(registry.registration_count("demo"), 1);
    }

    #[test]
    fn test_reregistration_replaces() {
        let registry = ServiceRegistry::new();
        let props = plugin_properties("demo");
        registry
            .register(Arc::new(EnglishGreeter) as Arc<dyn Greeter>, props.clone())
            .unwrap();
        registry
            .register(Arc::new(FrenchGreeter) as Arc<dyn Greeter>, props)
            .unwrap();

        assert_eq!(registry.registration_count("demo"), 1);
        let found = registry.lookup::<dyn Greeter>("demo").unwrap();
        assert_eq!(found.greet(), "bonjour");
    }

    #[test]
    fn test_missing_plugin_name_is_rejected() {
        let registry = ServiceRegistry::new();
        let result = registry.register(
            Arc::new(EnglishGreeter) as Arc<dyn Greeter>,
            ServiceProperties::new(),
        );
        assert!(matches!(result, Err(HostError::MissingPluginName)));
        assert_eq!(registry.registration_count(""), 0);
    }

    #[test]
    fn test_lookup_any_ignores_owner() {
        let registry = ServiceRegistry::new();
        registry
            .register(
                Arc::new(EnglishGreeter) as Arc<dyn Greeter>,
                plugin_properties("host-core"),
            )
            .unwrap();

        let found = registry.lookup_any::<dyn Greeter>().unwrap();
        assert_eq!(found.greet(), "hello");
    }

    #[test]
    fn test_unregister() {
        let registry = ServiceRegistry::new();
        registry
            .register(
                Arc::new(EnglishGreeter) as Arc<dyn Greeter>,
                plugin_properties("demo"),
            )
            .unwrap();

        assert!(registry.unregister::<dyn Greeter>("demo"));
        assert!(!registry.unregister::<dyn Greeter>("demo"));
        assert!(registry.lookup::<dyn Greeter>("demo").is_none());
    }

    #[test]
    fn test_properties_round_trip() {
        let registry = ServiceRegistry::new();
        let mut props = plugin_properties("demo");
        props.insert("version".to_string(), "1".to_string());
        registry
            .register(Arc::new(EnglishGreeter) as Arc<dyn Greeter>, props)
            .unwrap();

        let stored = registry.properties_of::<dyn Greeter>("demo").unwrap();
        assert_eq!(stored.get("version").map(String::as_str), Some("1"));
    }
}
