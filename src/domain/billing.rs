use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{BillGenerated, BillId, BillingError, DateRange, Percent, RentalId, Role};

/// Percentage points added to the offer discount when an employee is billed
pub const EMPLOYEE_BILL_DISCOUNT_POINTS: Decimal = Decimal::TEN;

/// Percentage taken off a request-time quote for employees
pub const EMPLOYEE_QUOTE_REDUCTION_PERCENT: Decimal = Decimal::TEN;

/// Minor-unit precision of the ledger currency
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Amount owed for a finished rental
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillResult {
    pub rate: Decimal,
    pub days: i64,
    /// Effective discount after the role adjustment and clamping
    pub discount_percent: Percent,
    pub repair_cost: Decimal,
    pub total_amount: Decimal,
}

/// Price shown to the requester when a rental is requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub rate: Decimal,
    pub days: i64,
    pub discount_percent: Percent,
    pub total_price: Decimal,
}

/// Bill issued for a rental; at most one per rental
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub bill_id: BillId,
    pub rental_id: RentalId,
    #[serde(flatten)]
    pub result: BillResult,
    pub issued_at: DateTime<Utc>,
}

/// Pure function: wrap a computed bill into a new [`Bill`]
pub fn issue_bill(
    rental_id: RentalId,
    result: BillResult,
    issued_at: DateTime<Utc>,
) -> (Bill, BillGenerated) {
    let bill_id = BillId::new();

    let event = BillGenerated {
        bill_id,
        rental_id,
        result: result.clone(),
        issued_at,
    };

    let bill = Bill {
        bill_id,
        rental_id,
        result,
        issued_at,
    };

    (bill, event)
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Pure function: computes the bill of a rental
///
/// Business rules:
/// - days = end - start (a date subtraction, not an inclusive day count)
/// - base = rate × days
/// - effective discount = offer discount, +10 points for Staff and Admin,
///   clamped to [0, 100]
/// - total = base × (1 - effective / 100) + repair cost, rounded to the minor unit
///
/// No side effects; identical inputs yield identical results.
pub fn compute_bill(
    rate: Decimal,
    start: NaiveDate,
    end: NaiveDate,
    discount_percent: Percent,
    repair_cost: Decimal,
    requester_role: Role,
) -> Result<BillResult, BillingError> {
    let range = DateRange::new(start, end)?;
    if rate.is_sign_negative() || repair_cost.is_sign_negative() {
        return Err(BillingError::NegativeAmount);
    }

    let days = range.duration_days();
    let base = rate * Decimal::from(days);

    let mut effective = discount_percent;
    if requester_role.is_employee() {
        effective = effective.add_points(EMPLOYEE_BILL_DISCOUNT_POINTS);
    }
    let effective = effective.clamp_to_valid();

    let total_amount = round_money(base * effective.remaining_fraction() + repair_cost);

    Ok(BillResult {
        rate,
        days,
        discount_percent: effective,
        repair_cost,
        total_amount,
    })
}

/// Pure function: request-time quote
///
/// Business rules:
/// - total = rate × days × (1 - discount / 100), discount clamped to [0, 100]
/// - for anyone who is not a Customer, 10 % of that total is taken off
///
/// This is a separate path from [`compute_bill`]; the two role adjustments differ.
pub fn quote_rental(
    rate: Decimal,
    start: NaiveDate,
    end: NaiveDate,
    discount_percent: Percent,
    requester_role: Role,
) -> Result<Quote, BillingError> {
    let range = DateRange::new(start, end)?;
    if rate.is_sign_negative() {
        return Err(BillingError::NegativeAmount);
    }

    let days = range.duration_days();
    let discount = discount_percent.clamp_to_valid();
    let mut total_price = rate * Decimal::from(days) * discount.remaining_fraction();
    if !requester_role.is_customer() {
        total_price -= total_price * EMPLOYEE_QUOTE_REDUCTION_PERCENT / Decimal::ONE_HUNDRED;
    }

    Ok(Quote {
        rate,
        days,
        discount_percent: discount,
        total_price: round_money(total_price),
    })
}
