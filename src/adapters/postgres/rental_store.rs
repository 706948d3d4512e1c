use crate::domain::{
    DateRange, Rental, RentalStatus,
    value_objects::{CarId, OfferId, RentalId, UserId},
};
use crate::ports::rental_store::{OverlappingApproval, RentalStore as RentalStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// SQLSTATE raised by the `rentals_no_overlapping_approval` exclusion constraint
const EXCLUSION_VIOLATION: &str = "23P01";

fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

/// Convert a `rentals` row into a [`Rental`]
///
/// Status text and the date pair are re-validated on the way in.
fn map_row_to_rental(row: &PgRow) -> Result<Rental> {
    let status_str: &str = row.get("status");
    let status = RentalStatus::from_str(status_str).map_err(invalid_data)?;

    let date_range = DateRange::new(row.get("start_date"), row.get("end_date"))
        .map_err(|e| invalid_data(e.to_string()))?;

    let approved_by: Option<uuid::Uuid> = row.get("approved_by");
    let offer_id: Option<uuid::Uuid> = row.get("offer_id");

    Ok(Rental {
        rental_id: RentalId::from_uuid(row.get("rental_id")),
        car_id: CarId::from_uuid(row.get("car_id")),
        requested_by: UserId::from_uuid(row.get("requested_by")),
        approved_by: approved_by.map(UserId::from_uuid),
        offer_id: offer_id.map(OfferId::from_uuid),
        date_range,
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// PostgreSQL implementation of RentalStore
///
/// The `rentals` table carries an exclusion constraint over approved rows,
/// so two approvals of the same car can never share a day even when they are
/// saved concurrently.
pub struct RentalStore {
    pool: PgPool,
}

impl RentalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalStoreTrait for RentalStore {
    async fn list_approved(&self, car_id: CarId) -> Result<Vec<Rental>> {
        let rows = sqlx::query(
            r#"
            SELECT
                rental_id,
                car_id,
                requested_by,
                approved_by,
                offer_id,
                start_date,
                end_date,
                status,
                created_at,
                updated_at
            FROM rentals
            WHERE car_id = $1 AND status = 'Approved'
            ORDER BY start_date ASC
            "#,
        )
        .bind(car_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_rental).collect()
    }

    /// Upsert the rental
    ///
    /// A violation of the approval exclusion constraint is reported as
    /// [`OverlappingApproval`].
    async fn save(&self, rental: Rental) -> Result<Rental> {
        let result = sqlx::query(
            r#"
            INSERT INTO rentals (
                rental_id,
                car_id,
                requested_by,
                approved_by,
                offer_id,
                start_date,
                end_date,
                status,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (rental_id)
            DO UPDATE SET
                approved_by = EXCLUDED.approved_by,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(rental.rental_id.value())
        .bind(rental.car_id.value())
        .bind(rental.requested_by.value())
        .bind(rental.approved_by.map(|id| id.value()))
        .bind(rental.offer_id.map(|id| id.value()))
        .bind(rental.date_range.start())
        .bind(rental.date_range.end())
        .bind(rental.status.as_str())
        .bind(rental.created_at)
        .bind(rental.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(rental),
            Err(sqlx::Error::Database(db))
                if db.code().as_deref() == Some(EXCLUSION_VIOLATION) =>
            {
                tracing::debug!(
                    rental_id = %rental.rental_id.value(),
                    car_id = %rental.car_id.value(),
                    "Approval rejected by exclusion constraint"
                );
                Err(Box::new(OverlappingApproval))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_id(&self, rental_id: RentalId) -> Result<Option<Rental>> {
        let row = sqlx::query(
            r#"
            SELECT
                rental_id,
                car_id,
                requested_by,
                approved_by,
                offer_id,
                start_date,
                end_date,
                status,
                created_at,
                updated_at
            FROM rentals
            WHERE rental_id = $1
            "#,
        )
        .bind(rental_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_rental).transpose()
    }

    async fn find_by_requester(&self, user_id: UserId) -> Result<Vec<Rental>> {
        let rows = sqlx::query(
            r#"
            SELECT
                rental_id,
                car_id,
                requested_by,
                approved_by,
                offer_id,
                start_date,
                end_date,
                status,
                created_at,
                updated_at
            FROM rentals
            WHERE requested_by = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_rental).collect()
    }
}
