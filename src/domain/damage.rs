use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DamageAssessed, DamageError, DamageId, DamageReported, RentalId, UserId};

/// Damage found on a car after a rental
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRecord {
    pub damage_id: DamageId,
    pub rental_id: RentalId,
    pub description: String,
    pub damaged_parts: String,
    pub reported_at: DateTime<Utc>,
    /// Unset until an employee assesses the damage
    pub repair_cost: Option<Decimal>,
    pub assessed_by: Option<UserId>,
}

/// Pure function: open a damage report without a repair cost
pub fn report_damage(
    rental_id: RentalId,
    description: String,
    damaged_parts: String,
    reported_at: DateTime<Utc>,
) -> (DamageRecord, DamageReported) {
    let damage_id = DamageId::new();

    let record = DamageRecord {
        damage_id,
        rental_id,
        description,
        damaged_parts,
        reported_at,
        repair_cost: None,
        assessed_by: None,
    };

    let event = DamageReported {
        damage_id,
        rental_id,
        reported_at,
    };

    (record, event)
}

/// Pure function: set the repair cost of a damage report
///
/// Re-assessment overwrites the previous cost and assessor.
pub fn assess_damage(
    record: &DamageRecord,
    repair_cost: Decimal,
    assessed_by: UserId,
) -> Result<(DamageRecord, DamageAssessed), DamageError> {
    if repair_cost.is_sign_negative() {
        return Err(DamageError::NegativeRepairCost);
    }

    let assessed = DamageRecord {
        repair_cost: Some(repair_cost),
        assessed_by: Some(assessed_by),
        ..record.clone()
    };

    let event = DamageAssessed {
        damage_id: record.damage_id,
        rental_id: record.rental_id,
        repair_cost,
        assessed_by,
    };

    Ok((assessed, event))
}

/// Repair cost billed for a rental; zero without an assessed damage record.
pub fn repair_cost_or_zero(repair_cost: Option<Decimal>) -> Decimal {
    repair_cost.unwrap_or(Decimal::ZERO)
}
