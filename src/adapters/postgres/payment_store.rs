use crate::domain::{
    Payment,
    value_objects::{BillId, PaymentId, RentalId, UserId},
};
use crate::ports::payment_store::{DuplicatePayment, PaymentStore as PaymentStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

/// SQLSTATE raised by the `payments.bill_id` unique constraint
const UNIQUE_VIOLATION: &str = "23505";

fn map_row_to_payment(row: &PgRow) -> Payment {
    let employee_id: Option<uuid::Uuid> = row.get("employee_id");

    Payment {
        payment_id: PaymentId::from_uuid(row.get("payment_id")),
        bill_id: BillId::from_uuid(row.get("bill_id")),
        rental_id: RentalId::from_uuid(row.get("rental_id")),
        paid_amount: row.get("paid_amount"),
        payment_method: row.get("payment_method"),
        customer_id: UserId::from_uuid(row.get("customer_id")),
        employee_id: employee_id.map(UserId::from_uuid),
        paid_at: row.get("paid_at"),
    }
}

/// PostgreSQL implementation of PaymentStore
pub struct PaymentStore {
    pool: PgPool,
}

impl PaymentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentStoreTrait for PaymentStore {
    async fn find_by_bill(&self, bill_id: BillId) -> Result<Option<Payment>> {
        let row = sqlx::query(
            r#"
            SELECT
                payment_id,
                bill_id,
                rental_id,
                paid_amount,
                payment_method,
                customer_id,
                employee_id,
                paid_at
            FROM payments
            WHERE bill_id = $1
            "#,
        )
        .bind(bill_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_payment))
    }

    async fn save(&self, payment: Payment) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id,
                bill_id,
                rental_id,
                paid_amount,
                payment_method,
                customer_id,
                employee_id,
                paid_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(payment.payment_id.value())
        .bind(payment.bill_id.value())
        .bind(payment.rental_id.value())
        .bind(payment.paid_amount)
        .bind(&payment.payment_method)
        .bind(payment.customer_id.value())
        .bind(payment.employee_id.map(|id| id.value()))
        .bind(payment.paid_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(Box::new(DuplicatePayment))
            }
            Err(e) => Err(e.into()),
        }
    }
}
