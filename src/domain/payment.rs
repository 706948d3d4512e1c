use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Bill, BillId, PaymentError, PaymentId, PaymentRecorded, RentalId, UserId};

/// Method recorded when the payer does not name one
pub const DEFAULT_PAYMENT_METHOD: &str = "Manual";

/// Settlement of a bill; at most one per bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub bill_id: BillId,
    pub rental_id: RentalId,
    pub paid_amount: Decimal,
    pub payment_method: String,
    /// Requester of the rental
    pub customer_id: UserId,
    /// Employee who took the payment, if it was not made by the customer
    pub employee_id: Option<UserId>,
    pub paid_at: DateTime<Utc>,
}

/// Pure function: settle a bill
///
/// Business rules:
/// - A bill is paid once
/// - The paid amount must equal the bill total
pub fn record_payment(
    bill: &Bill,
    existing: Option<&Payment>,
    paid_amount: Decimal,
    payment_method: Option<String>,
    customer_id: UserId,
    employee_id: Option<UserId>,
    paid_at: DateTime<Utc>,
) -> Result<(Payment, PaymentRecorded), PaymentError> {
    if existing.is_some() {
        return Err(PaymentError::AlreadyPaid);
    }

    let expected = bill.result.total_amount;
    if paid_amount != expected {
        return Err(PaymentError::AmountMismatch {
            expected,
            paid: paid_amount,
        });
    }

    let payment_id = PaymentId::new();
    let payment = Payment {
        payment_id,
        bill_id: bill.bill_id,
        rental_id: bill.rental_id,
        paid_amount,
        payment_method: payment_method
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        customer_id,
        employee_id,
        paid_at,
    };

    let event = PaymentRecorded {
        payment_id,
        bill_id: bill.bill_id,
        rental_id: bill.rental_id,
        paid_amount,
        customer_id,
        paid_at,
    };

    Ok((payment, event))
}
