use crate::domain::{
    DamageRecord,
    value_objects::{DamageId, RentalId, UserId},
};
use crate::ports::damage_store::{DamageStore as DamageStoreTrait, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_damage(row: &PgRow) -> DamageRecord {
    let assessed_by: Option<uuid::Uuid> = row.get("assessed_by");

    DamageRecord {
        damage_id: DamageId::from_uuid(row.get("damage_id")),
        rental_id: RentalId::from_uuid(row.get("rental_id")),
        description: row.get("description"),
        damaged_parts: row.get("damaged_parts"),
        reported_at: row.get("reported_at"),
        repair_cost: row.get("repair_cost"),
        assessed_by: assessed_by.map(UserId::from_uuid),
    }
}

/// PostgreSQL implementation of DamageStore
pub struct DamageStore {
    pool: PgPool,
}

impl DamageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DamageStoreTrait for DamageStore {
    /// Sum of the assessed repair costs of a rental
    ///
    /// `SUM` over no rows is NULL, which maps to `None`.
    async fn get_repair_cost(&self, rental_id: RentalId) -> Result<Option<Decimal>> {
        let row = sqlx::query(
            r#"
            SELECT SUM(repair_cost) AS repair_cost
            FROM damages
            WHERE rental_id = $1 AND repair_cost IS NOT NULL
            "#,
        )
        .bind(rental_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("repair_cost"))
    }

    async fn save(&self, record: DamageRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO damages (
                damage_id,
                rental_id,
                description,
                damaged_parts,
                reported_at,
                repair_cost,
                assessed_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (damage_id)
            DO UPDATE SET
                description = EXCLUDED.description,
                damaged_parts = EXCLUDED.damaged_parts,
                repair_cost = EXCLUDED.repair_cost,
                assessed_by = EXCLUDED.assessed_by
            "#,
        )
        .bind(record.damage_id.value())
        .bind(record.rental_id.value())
        .bind(&record.description)
        .bind(&record.damaged_parts)
        .bind(record.reported_at)
        .bind(record.repair_cost)
        .bind(record.assessed_by.map(|id| id.value()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, damage_id: DamageId) -> Result<Option<DamageRecord>> {
        let row = sqlx::query(
            r#"
            SELECT
                damage_id,
                rental_id,
                description,
                damaged_parts,
                reported_at,
                repair_cost,
                assessed_by
            FROM damages
            WHERE damage_id = $1
            "#,
        )
        .bind(damage_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_damage))
    }

    async fn find_by_rental(&self, rental_id: RentalId) -> Result<Vec<DamageRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT
                damage_id,
                rental_id,
                description,
                damaged_parts,
                reported_at,
                repair_cost,
                assessed_by
            FROM damages
            WHERE rental_id = $1
            ORDER BY reported_at ASC
            "#,
        )
        .bind(rental_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_damage).collect())
    }
}
