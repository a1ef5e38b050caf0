//! Domain event listener.

use async_trait::async_trait;
use tracing::debug;

use tally_host::{EventListener, HostEvent};

/// Pass-through event listener.
///
/// Invoked by the host's dispatcher on every domain event; performs no
/// observable action. Extension point for real behavior, e.g. reacting to
/// payment failures.
pub struct HelloListener;

#[async_trait]
impl EventListener for HelloListener {
    async fn on_event(&self, event: &HostEvent) {
        debug!(
            plugin = crate::PLUGIN_NAME,
            event = event.name(),
            "Event received"
        );
    }
}
