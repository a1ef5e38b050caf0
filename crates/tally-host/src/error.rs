//! Host API error types.

use thiserror::Error;

/// Errors surfaced by the host API.
#[derive(Error, Debug)]
pub enum HostError {
    /// A required host service was absent from the registry.
    ///
    /// This is an unrecoverable environment error: the host deployment is
    /// misconfigured and there is nothing to retry.
    #[error("required host service not registered: {0}")]
    ServiceNotFound(&'static str),

    /// A registration's property map did not name its owning plugin.
    #[error("service registration is missing the 'plugin.name' property")]
    MissingPluginName,
}

/// Result type for host API operations.
pub type HostResult<T> = Result<T, HostError>;
