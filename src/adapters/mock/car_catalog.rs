use crate::domain::value_objects::{CarId, OfferId};
use crate::ports::car_catalog::{CarCatalog as CarCatalogTrait, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory CarCatalog
///
/// Supports stateful testing: register cars with a daily rate and offers
/// with a discount percentage.
pub struct CarCatalog {
    rates: Mutex<HashMap<CarId, Decimal>>,
    offers: Mutex<HashMap<OfferId, Decimal>>,
}

impl CarCatalog {
    pub fn new() -> Self {
        Self {
            rates: Mutex::new(HashMap::new()),
            offers: Mutex::new(HashMap::new()),
        }
    }

    /// Register a car and its daily rate
    pub fn add_car(&self, car_id: CarId, rate: Decimal) {
        self.rates.lock().unwrap().insert(car_id, rate);
    }

    /// Register an offer and its discount percentage
    pub fn add_offer(&self, offer_id: OfferId, discount: Decimal) {
        self.offers.lock().unwrap().insert(offer_id, discount);
    }
}

impl Default for CarCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarCatalogTrait for CarCatalog {
    async fn get_car_rate(&self, car_id: CarId) -> Result<Option<Decimal>> {
        Ok(self.rates.lock().unwrap().get(&car_id).copied())
    }

    async fn get_offer_discount(&self, offer_id: OfferId) -> Result<Option<Decimal>> {
        Ok(self.offers.lock().unwrap().get(&offer_id).copied())
    }
}
