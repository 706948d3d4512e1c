use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CarId, DamageId, OfferId, RentalId, RentalStatus, UserId};

/// Command: request a car for a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRental {
    pub car_id: CarId,
    pub requested_by: UserId,
    pub offer_id: Option<OfferId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub requested_at: DateTime<Utc>,
}

/// Command: move a rental to a new status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRentalStatus {
    pub rental_id: RentalId,
    pub new_status: RentalStatus,
    pub changed_by: UserId,
    pub changed_at: DateTime<Utc>,
}

/// Command: issue the bill of a rental
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateBill {
    pub rental_id: RentalId,
    pub issued_at: DateTime<Utc>,
}

/// Command: report damage found on a returned car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDamage {
    pub rental_id: RentalId,
    pub description: String,
    pub damaged_parts: String,
    pub reported_at: DateTime<Utc>,
}

/// Command: price the repair of a damage report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessDamage {
    pub damage_id: DamageId,
    pub repair_cost: Decimal,
    pub assessed_by: UserId,
}

/// Command: record the payment of a rental's bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayment {
    pub rental_id: RentalId,
    pub paid_amount: Decimal,
    /// "Manual" when not given
    pub payment_method: Option<String>,
    pub recorded_by: UserId,
    pub paid_at: DateTime<Utc>,
}
