//! Domain events and the host-side dispatcher.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::properties::PropertyBag;

/// Events the host dispatches to plugin-registered listeners.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// The stored configuration for `plugin_name` changed.
    ConfigurationChanged {
        plugin_name: String,
        properties: PropertyBag,
    },
    /// A new account was created.
    AccountCreated { account_id: Uuid },
    /// An invoice was generated for an account.
    InvoiceCreated { account_id: Uuid, invoice_id: Uuid },
    /// A payment attempt succeeded.
    PaymentSuccess { account_id: Uuid, payment_id: Uuid },
    /// A payment attempt failed.
    PaymentFailed { account_id: Uuid, payment_id: Uuid },
}

impl HostEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConfigurationChanged { .. } => "configuration_changed",
            Self::AccountCreated { .. } => "account_created",
            Self::InvoiceCreated { .. } => "invoice_created",
            Self::PaymentSuccess { .. } => "payment_success",
            Self::PaymentFailed { .. } => "payment_failed",
        }
    }
}

/// A plugin-registered handler invoked for each domain event.
#[async_trait]
pub trait EventListener: Send + Sync {
    async fn on_event(&self, event: &HostEvent);
}

/// Sequential event dispatcher.
///
/// Listeners run in registration order on whatever task the host
/// dispatches from; a listener that needs isolation must spawn its own
/// work.
pub struct EventDispatcher {
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Appends a listener. Dispatch order is registration order.
    pub fn register(&self, listener: Arc<dyn EventListener>) {
        self.listeners.write().push(listener);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Invokes every registered listener with `event`, sequentially.
    pub async fn dispatch(&self, event: &HostEvent) {
        let snapshot: Vec<_> = self.listeners.read().iter().cloned().collect();
        debug!(
            event = event.name(),
            listeners = snapshot.len(),
            "Dispatching event"
        );
        for listener in snapshot {
            listener.on_event(event).await;
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingListener {
        seen: AtomicUsize,
    }

    #[async_trait]
    impl EventListener for CountingListener {
        async fn on_event(&self, _event: &HostEvent) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_dispatch_reaches_every_listener() {
        let dispatcher = EventDispatcher::new();
        let first = Arc::new(CountingListener {
            seen: AtomicUsize::new(0),
        });
        let second = Arc::new(CountingListener {
            seen: AtomicUsize::new(0),
        });
        dispatcher.register(Arc::clone(&first) as Arc<dyn EventListener>);
        dispatcher.register(Arc::clone(&second) as Arc<dyn EventListener>);

        let event = HostEvent::AccountCreated {
            account_id: Uuid::new_v4(),
        };
        dispatcher.dispatch(&event).await;
        dispatcher.dispatch(&event).await;

        assert_eq!(dispatcher.listener_count(), 2);
        assert_eq!(first.seen.load(Ordering::SeqCst), 2);
        assert_eq!(second.seen.load(Ordering::SeqCst), 2);
    }
}
