//! Payment capability surface.
//!
//! The host routes charge/refund traffic to whichever plugin registered a
//! [`PaymentCapability`] for the paying account. Operations a plugin does
//! not implement report the [`PaymentOutcome::Unsupported`] sentinel — a
//! normal result value, not an error.

use async_trait::async_trait;
use uuid::Uuid;

/// Outcome of a payment operation as reported by a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Processed,
    Pending,
    Error,
    Canceled,
    /// Host-defined sentinel: the plugin does not implement this operation.
    Unsupported,
}

/// One payment operation the host asks a plugin to perform.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub account_id: Uuid,
    pub payment_id: Uuid,
    /// Amount in minor currency units (cents).
    pub amount_minor: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Result record for a payment operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTransaction {
    pub payment_id: Uuid,
    pub outcome: PaymentOutcome,
}

impl PaymentTransaction {
    /// The unsupported-operation sentinel for `request`.
    pub fn unsupported(request: &PaymentRequest) -> Self {
        Self {
            payment_id: request.payment_id,
            outcome: PaymentOutcome::Unsupported,
        }
    }
}

/// Payment-processing capability a plugin registers with the host.
#[async_trait]
pub trait PaymentCapability: Send + Sync {
    async fn authorize(&self, request: &PaymentRequest) -> PaymentTransaction;

    async fn capture(&self, request: &PaymentRequest) -> PaymentTransaction;

    async fn purchase(&self, request: &PaymentRequest) -> PaymentTransaction;

    async fn void(&self, request: &PaymentRequest) -> PaymentTransaction;

    async fn credit(&self, request: &PaymentRequest) -> PaymentTransaction;

    async fn refund(&self, request: &PaymentRequest) -> PaymentTransaction;

    /// Transactions recorded for `payment_id`, oldest first.
    async fn payment_info(&self, payment_id: Uuid) -> Vec<PaymentTransaction>;
}
