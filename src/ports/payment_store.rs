use crate::domain::{Payment, value_objects::BillId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Payment store port
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// The payment settling a bill, if any.
    async fn find_by_bill(&self, bill_id: BillId) -> Result<Option<Payment>>;

    /// Save a new payment.
    ///
    /// A bill is paid at most once; implementations reject a second payment
    /// with [`DuplicatePayment`].
    async fn save(&self, payment: Payment) -> Result<()>;
}

/// Returned by [`PaymentStore::save`] when the bill already has a payment.
#[derive(Debug, thiserror::Error)]
#[error("the bill has already been paid")]
pub struct DuplicatePayment;
