use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::RentalStatus;

/// Malformed date input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// The range starts after it ends
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
    /// The range is longer than a rental may last
    TooLong {
        start: NaiveDate,
        end: NaiveDate,
        max_days: i64,
    },
}

/// Rental lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentalError {
    /// A date range on the rental or on an approved rental is malformed
    InvalidRange(DateRangeError),
    /// The requested status change is not allowed from the current status
    InvalidTransition {
        from: RentalStatus,
        to: RentalStatus,
    },
    /// The car is already occupied on at least one requested day
    CarNotAvailable,
}

impl From<DateRangeError> for RentalError {
    fn from(err: DateRangeError) -> Self {
        RentalError::InvalidRange(err)
    }
}

/// Billing and quoting errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    InvalidRange(DateRangeError),
    /// Car rate or repair cost is negative
    NegativeAmount,
}

impl From<DateRangeError> for BillingError {
    fn from(err: DateRangeError) -> Self {
        BillingError::InvalidRange(err)
    }
}

/// Damage assessment errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageError {
    NegativeRepairCost,
}

/// Payment errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The bill already has a payment
    AlreadyPaid,
    /// Payments settle the whole bill; partial or excess amounts are refused
    AmountMismatch { expected: Decimal, paid: Decimal },
}

impl std::fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateRangeError::StartAfterEnd { start, end } => {
                write!(f, "start date {} is after end date {}", start, end)
            }
            DateRangeError::TooLong {
                start,
                end,
                max_days,
            } => write!(
                f,
                "range {} to {} is longer than {} days",
                start, end, max_days
            ),
        }
    }
}
