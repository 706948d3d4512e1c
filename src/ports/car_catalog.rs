use crate::domain::value_objects::{CarId, OfferId};
use async_trait::async_trait;
use rust_decimal::Decimal;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Car catalog port
///
/// Keeps the boundary between the rental ledger and the fleet catalog.
/// The ledger only knows car and offer IDs plus the prices it needs.
#[async_trait]
pub trait CarCatalog: Send + Sync {
    /// Daily rate of a car, `None` if the car does not exist.
    async fn get_car_rate(&self, car_id: CarId) -> Result<Option<Decimal>>;

    /// Discount percentage of an offer, `None` if the offer does not exist.
    async fn get_offer_discount(&self, offer_id: OfferId) -> Result<Option<Decimal>>;
}
