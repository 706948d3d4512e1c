use crate::domain::{
    Bill, BillResult, Percent,
    value_objects::{BillId, RentalId},
};
use crate::ports::bill_store::{BillStore as BillStoreTrait, DuplicateBill, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};

/// SQLSTATE raised by the `bills.rental_id` unique constraint
const UNIQUE_VIOLATION: &str = "23505";

fn map_row_to_bill(row: &PgRow) -> Bill {
    let discount_percent: Decimal = row.get("discount_percent");

    Bill {
        bill_id: BillId::from_uuid(row.get("bill_id")),
        rental_id: RentalId::from_uuid(row.get("rental_id")),
        result: BillResult {
            rate: row.get("rate"),
            days: row.get("days"),
            discount_percent: Percent::new(discount_percent),
            repair_cost: row.get("repair_cost"),
            total_amount: row.get("total_amount"),
        },
        issued_at: row.get("issued_at"),
    }
}

/// PostgreSQL implementation of BillStore
///
/// `bills.rental_id` is unique; a second bill for the same rental fails on
/// insert with [`DuplicateBill`].
pub struct BillStore {
    pool: PgPool,
}

impl BillStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BillStoreTrait for BillStore {
    async fn find_by_rental(&self, rental_id: RentalId) -> Result<Option<Bill>> {
        let row = sqlx::query(
            r#"
            SELECT
                bill_id,
                rental_id,
                rate,
                days,
                discount_percent,
                repair_cost,
                total_amount,
                issued_at
            FROM bills
            WHERE rental_id = $1
            "#,
        )
        .bind(rental_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_bill))
    }

    async fn save(&self, bill: Bill) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO bills (
                bill_id,
                rental_id,
                rate,
                days,
                discount_percent,
                repair_cost,
                total_amount,
                issued_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(bill.bill_id.value())
        .bind(bill.rental_id.value())
        .bind(bill.result.rate)
        .bind(bill.result.days)
        .bind(bill.result.discount_percent.value())
        .bind(bill.result.repair_cost)
        .bind(bill.result.total_amount)
        .bind(bill.issued_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                tracing::debug!(
                    rental_id = %bill.rental_id.value(),
                    "Bill rejected by unique constraint"
                );
                Err(Box::new(DuplicateBill))
            }
            Err(e) => Err(e.into()),
        }
    }
}
