use crate::domain::{
    Rental,
    value_objects::{CarId, RentalId, UserId},
};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Rental store port
///
/// Persists rental aggregates. The application checks availability against
/// `list_approved` and then calls `save`; the two calls are not atomic. A
/// store shared by concurrent writers rejects an approval that would overlap
/// another approved rental of the car with [`OverlappingApproval`].
#[async_trait]
pub trait RentalStore: Send + Sync {
    /// List the approved rentals of a car.
    ///
    /// Used as the snapshot for availability checks.
    async fn list_approved(&self, car_id: CarId) -> Result<Vec<Rental>>;

    /// Save the full current state of a rental (insert or update).
    async fn save(&self, rental: Rental) -> Result<Rental>;

    /// Get a single rental by ID.
    async fn get_by_id(&self, rental_id: RentalId) -> Result<Option<Rental>>;

    /// Find every rental requested by a user, newest first.
    async fn find_by_requester(&self, user_id: UserId) -> Result<Vec<Rental>>;
}

/// Returned by [`RentalStore::save`] when saving an approval would make two
/// approved rentals of the same car share a day.
#[derive(Debug, thiserror::Error)]
#[error("approved rentals of the same car would overlap")]
pub struct OverlappingApproval;
