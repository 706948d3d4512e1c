use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{
    BillingError, DamageError, DateRangeError, PaymentError, RentalError, RentalStatus,
};

/// Errors of the rental ledger application layer
#[derive(Debug, Error)]
pub enum RentalApplicationError {
    /// Malformed date input
    #[error("Invalid date range: {0}")]
    InvalidRange(DateRangeError),

    /// Illegal status change
    #[error("Cannot change rental status from {from} to {to}")]
    InvalidTransition {
        from: RentalStatus,
        to: RentalStatus,
    },

    /// The car is already rented on at least one requested day
    #[error("Car is not available in the requested period")]
    CarNotAvailable,

    /// The user's role does not allow the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A price or cost is negative
    #[error("Amounts must not be negative")]
    NegativeAmount,

    #[error("Car not found")]
    CarNotFound,

    #[error("Offer not found")]
    OfferNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Rental not found")]
    RentalNotFound,

    #[error("Damage report not found")]
    DamageNotFound,

    /// The rental has no bill yet
    #[error("Bill not found")]
    BillNotFound,

    #[error("Bill has already been paid")]
    AlreadyPaid,

    /// The payment does not settle the bill exactly
    #[error("Paid amount {paid} does not match bill total {expected}")]
    AmountMismatch { expected: Decimal, paid: Decimal },

    /// RentalStore failure
    #[error("Rental store error")]
    RentalStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BillStore failure
    #[error("Bill store error")]
    BillStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// DamageStore failure
    #[error("Damage store error")]
    DamageStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// PaymentStore failure
    #[error("Payment store error")]
    PaymentStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// CarCatalog failure
    #[error("Car catalog error")]
    CarCatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// UserDirectory failure
    #[error("User directory error")]
    UserDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<DateRangeError> for RentalApplicationError {
    fn from(err: DateRangeError) -> Self {
        RentalApplicationError::InvalidRange(err)
    }
}

impl From<RentalError> for RentalApplicationError {
    fn from(err: RentalError) -> Self {
        match err {
            RentalError::InvalidRange(e) => RentalApplicationError::InvalidRange(e),
            RentalError::InvalidTransition { from, to } => {
                RentalApplicationError::InvalidTransition { from, to }
            }
            RentalError::CarNotAvailable => RentalApplicationError::CarNotAvailable,
        }
    }
}

impl From<BillingError> for RentalApplicationError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::InvalidRange(e) => RentalApplicationError::InvalidRange(e),
            BillingError::NegativeAmount => RentalApplicationError::NegativeAmount,
        }
    }
}

impl From<DamageError> for RentalApplicationError {
    fn from(err: DamageError) -> Self {
        match err {
            DamageError::NegativeRepairCost => RentalApplicationError::NegativeAmount,
        }
    }
}

impl From<PaymentError> for RentalApplicationError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::AlreadyPaid => RentalApplicationError::AlreadyPaid,
            PaymentError::AmountMismatch { expected, paid } => {
                RentalApplicationError::AmountMismatch { expected, paid }
            }
        }
    }
}

/// Application layer Result type
pub type Result<T> = std::result::Result<T, RentalApplicationError>;
