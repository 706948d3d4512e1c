use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    BillId, BillResult, CarId, DamageId, DateRange, OfferId, PaymentId, RentalId, RentalStatus,
    UserId,
};

/// Event: a rental was requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRequested {
    pub rental_id: RentalId,
    pub car_id: CarId,
    pub requested_by: UserId,
    pub offer_id: Option<OfferId>,
    pub date_range: DateRange,
    pub requested_at: DateTime<Utc>,
}

/// Event: a rental moved to a new status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalStatusChanged {
    pub rental_id: RentalId,
    pub car_id: CarId,
    pub requested_by: UserId,
    pub old_status: RentalStatus,
    pub new_status: RentalStatus,
    pub changed_by: UserId,
    pub changed_at: DateTime<Utc>,
}

/// Event: a bill was issued for a rental
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillGenerated {
    pub bill_id: BillId,
    pub rental_id: RentalId,
    pub result: BillResult,
    pub issued_at: DateTime<Utc>,
}

/// Event: damage was reported on a rental
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReported {
    pub damage_id: DamageId,
    pub rental_id: RentalId,
    pub reported_at: DateTime<Utc>,
}

/// Event: an employee priced the repair of a damage report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageAssessed {
    pub damage_id: DamageId,
    pub rental_id: RentalId,
    pub repair_cost: Decimal,
    pub assessed_by: UserId,
}

/// Event: a bill was settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecorded {
    pub payment_id: PaymentId,
    pub bill_id: BillId,
    pub rental_id: RentalId,
    pub paid_amount: Decimal,
    pub customer_id: UserId,
    pub paid_at: DateTime<Utc>,
}

/// Domain events, unified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    RentalRequested(RentalRequested),
    RentalStatusChanged(RentalStatusChanged),
    BillGenerated(BillGenerated),
    DamageReported(DamageReported),
    DamageAssessed(DamageAssessed),
    PaymentRecorded(PaymentRecorded),
}
