use crate::domain::{
    DamageRecord, DomainEvent,
    commands::{AssessDamage, ReportDamage},
    damage,
};

use super::errors::{RentalApplicationError, Result};
use super::rental_service::{ServiceDependencies, load_rental, load_role, publish};

/// Report damage found on the car of a rental
pub async fn report_damage(deps: &ServiceDependencies, cmd: ReportDamage) -> Result<DamageRecord> {
    let rental = load_rental(&deps.rental_store, cmd.rental_id).await?;

    let (record, event) = damage::report_damage(
        rental.rental_id,
        cmd.description,
        cmd.damaged_parts,
        cmd.reported_at,
    );

    deps.damage_store
        .save(record.clone())
        .await
        .map_err(RentalApplicationError::DamageStoreError)?;

    tracing::info!(
        damage_id = %record.damage_id.value(),
        rental_id = %record.rental_id.value(),
        "Damage reported"
    );

    publish(deps, DomainEvent::DamageReported(event)).await;

    Ok(record)
}

/// Price the repair of a damage report
///
/// Business rules:
/// - Only staff and admins assess damage
/// - The repair cost must not be negative
pub async fn assess_damage(deps: &ServiceDependencies, cmd: AssessDamage) -> Result<DamageRecord> {
    let role = load_role(&deps.user_directory, cmd.assessed_by).await?;
    if !role.is_employee() {
        return Err(RentalApplicationError::Forbidden(
            "Only staff and admins may assess damage".to_string(),
        ));
    }

    let record = deps
        .damage_store
        .get_by_id(cmd.damage_id)
        .await
        .map_err(RentalApplicationError::DamageStoreError)?
        .ok_or(RentalApplicationError::DamageNotFound)?;

    let (assessed, event) = damage::assess_damage(&record, cmd.repair_cost, cmd.assessed_by)?;

    deps.damage_store
        .save(assessed.clone())
        .await
        .map_err(RentalApplicationError::DamageStoreError)?;

    tracing::info!(
        damage_id = %assessed.damage_id.value(),
        repair_cost = %cmd.repair_cost,
        "Damage assessed"
    );

    publish(deps, DomainEvent::DamageAssessed(event)).await;

    Ok(assessed)
}
