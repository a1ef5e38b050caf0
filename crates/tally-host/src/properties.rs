//! Property bags exchanged with the host.

use std::collections::HashMap;

/// Property key under which every registration carries its owning plugin's
/// name.
pub const PLUGIN_NAME_PROP: &str = "plugin.name";

/// Property key selecting the deployment region variant of a configuration.
pub const REGION_PROP: &str = "region";

/// Free-form string key/value bag supplied by the host at startup and on
/// each configuration-change event.
pub type PropertyBag = HashMap<String, String>;

/// Properties tagging a service registration.
pub type ServiceProperties = HashMap<String, String>;

/// Builds the canonical property map for a plugin-owned registration.
pub fn plugin_properties(plugin_name: &str) -> ServiceProperties {
    HashMap::from([(PLUGIN_NAME_PROP.to_string(), plugin_name.to_string())])
}

/// Reads the deployment region from a host property bag.
pub fn region(properties: &PropertyBag) -> Option<&str> {
    properties.get(REGION_PROP).map(String::as_str)
}
