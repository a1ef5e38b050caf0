//! Request-scoped tenant identity.

use std::fmt;

/// Opaque caller identity the host attaches to a request when the caller
/// supplied the credential header pair.
///
/// Request-scoped: the host resolves it per request and plugins must not
/// cache it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    id: String,
}

impl Tenant {
    /// Creates a tenant from its opaque identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The opaque tenant identifier.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
