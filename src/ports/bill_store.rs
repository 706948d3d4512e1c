use crate::domain::{Bill, value_objects::RentalId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Bill store port
#[async_trait]
pub trait BillStore: Send + Sync {
    /// The bill issued for a rental, if any.
    async fn find_by_rental(&self, rental_id: RentalId) -> Result<Option<Bill>>;

    /// Save a newly issued bill.
    ///
    /// A rental has at most one bill; implementations reject a second one
    /// with [`DuplicateBill`].
    async fn save(&self, bill: Bill) -> Result<()>;
}

/// Returned by [`BillStore::save`] when the rental already has a bill.
#[derive(Debug, thiserror::Error)]
#[error("a bill was already issued for this rental")]
pub struct DuplicateBill;
