//! Payment capability stub.

use async_trait::async_trait;
use uuid::Uuid;

use tally_host::{PaymentCapability, PaymentRequest, PaymentTransaction};

/// Empty implementation of the host's payment capability.
///
/// Registered so the host can route payment traffic to this plugin; every
/// operation reports the unsupported sentinel. Replacing the method bodies
/// with real charge/refund logic is what an actual payment plugin would
/// do.
pub struct HelloPaymentCapability;

#[async_trait]
impl PaymentCapability for HelloPaymentCapability {
    async fn authorize(&self, request: &PaymentRequest) -> PaymentTransaction {
        PaymentTransaction::unsupported(request)
    }

    async fn capture(&self, request: &PaymentRequest) -> PaymentTransaction {
        PaymentTransaction::unsupported(request)
    }

    async fn purchase(&self, request: &PaymentRequest) -> PaymentTransaction {
        PaymentTransaction::unsupported(request)
    }

    async fn void(&self, request: &PaymentRequest) -> PaymentTransaction {
        PaymentTransaction::unsupported(request)
    }

    async fn credit(&self, request: &PaymentRequest) -> PaymentTransaction {
        PaymentTransaction::unsupported(request)
    }

    async fn refund(&self, request: &PaymentRequest) -> PaymentTransaction {
        PaymentTransaction::unsupported(request)
    }

    async fn payment_info(&self, _payment_id: Uuid) -> Vec<PaymentTransaction> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_host::PaymentOutcome;

    fn request() -> PaymentRequest {
        PaymentRequest {
            account_id: Uuid::new_v4(),
            payment_id: Uuid::new_v4(),
            amount_minor: 1999,
            currency: "USD".to_string(),
        }
    }

    #[tokio::test]
    async fn test_every_operation_is_unsupported() {
        let capability = HelloPaymentCapability;
        let request = request();

        for transaction in [
            capability.authorize(&request).await,
            capability.capture(&request).await,
            capability.purchase(&request).await,
            capability.void(&request).await,
            capability.credit(&request).await,
            capability.refund(&request).await,
        ] {
            assert_eq!(transaction.outcome, PaymentOutcome::Unsupported);
            assert_eq!(transaction.payment_id, request.payment_id);
        }

        assert!(capability.payment_info(request.payment_id).await.is_empty());
    }
}
