use crate::domain::{
    DamageRecord,
    value_objects::{DamageId, RentalId},
};
use async_trait::async_trait;
use rust_decimal::Decimal;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Damage store port
#[async_trait]
pub trait DamageStore: Send + Sync {
    /// Repair cost recorded for a rental.
    ///
    /// `None` when no damage was reported or no report has been assessed yet.
    /// Several assessed reports on one rental are summed.
    async fn get_repair_cost(&self, rental_id: RentalId) -> Result<Option<Decimal>>;

    /// Save the full current state of a damage report (insert or update).
    async fn save(&self, record: DamageRecord) -> Result<()>;

    async fn get_by_id(&self, damage_id: DamageId) -> Result<Option<DamageRecord>>;

    async fn find_by_rental(&self, rental_id: RentalId) -> Result<Vec<DamageRecord>>;
}
