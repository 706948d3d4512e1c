use crate::domain::{Bill, DomainEvent, billing, commands::GenerateBill, damage};
use crate::ports::DuplicateBill;

use super::errors::{RentalApplicationError, Result};
use super::rental_service::{
    ServiceDependencies, load_car_rate, load_offer_discount, load_rental, load_role, publish,
};

/// Outcome of a bill request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillOutcome {
    /// A new bill was computed and saved
    Issued(Bill),
    /// The rental already had a bill; it is returned unchanged
    AlreadyIssued(Bill),
}

impl BillOutcome {
    pub fn bill(&self) -> &Bill {
        match self {
            BillOutcome::Issued(bill) | BillOutcome::AlreadyIssued(bill) => bill,
        }
    }

    pub fn into_bill(self) -> Bill {
        match self {
            BillOutcome::Issued(bill) | BillOutcome::AlreadyIssued(bill) => bill,
        }
    }
}

/// Issue the bill of a rental
///
/// Business rules:
/// - A rental has at most one bill; asking again, or concurrently, returns
///   the existing one
/// - Rate comes from the car, discount from the rental's offer (zero without one)
/// - Assessed repair costs are added on top (zero without damage)
/// - Staff and admins get 10 extra discount points
pub async fn generate_bill(deps: &ServiceDependencies, cmd: GenerateBill) -> Result<BillOutcome> {
    // 1. The rental must exist
    let rental = load_rental(&deps.rental_store, cmd.rental_id).await?;

    // 2. At most one bill per rental
    let existing = deps
        .bill_store
        .find_by_rental(rental.rental_id)
        .await
        .map_err(RentalApplicationError::BillStoreError)?;
    if let Some(bill) = existing {
        tracing::debug!(rental_id = %rental.rental_id.value(), "Bill already issued");
        return Ok(BillOutcome::AlreadyIssued(bill));
    }

    // 3. Gather inputs
    let repair_cost = async {
        deps.damage_store
            .get_repair_cost(rental.rental_id)
            .await
            .map_err(RentalApplicationError::DamageStoreError)
    };
    let (rate, discount, role, repair_cost) = futures::try_join!(
        load_car_rate(&deps.car_catalog, rental.car_id),
        load_offer_discount(&deps.car_catalog, rental.offer_id),
        load_role(&deps.user_directory, rental.requested_by),
        repair_cost,
    )?;

    // 4. Pure domain functions
    let result = billing::compute_bill(
        rate,
        rental.date_range.start(),
        rental.date_range.end(),
        discount,
        damage::repair_cost_or_zero(repair_cost),
        role,
    )?;
    let (bill, event) = billing::issue_bill(rental.rental_id, result, cmd.issued_at);

    // 5. Persist; a concurrent request may have issued the bill meanwhile
    if let Err(e) = deps.bill_store.save(bill.clone()).await {
        if !e.is::<DuplicateBill>() {
            return Err(RentalApplicationError::BillStoreError(e));
        }
        let existing = deps
            .bill_store
            .find_by_rental(rental.rental_id)
            .await
            .map_err(RentalApplicationError::BillStoreError)?
            .ok_or(RentalApplicationError::BillStoreError(e))?;
        tracing::debug!(rental_id = %rental.rental_id.value(), "Bill issued concurrently");
        return Ok(BillOutcome::AlreadyIssued(existing));
    }

    tracing::info!(
        rental_id = %bill.rental_id.value(),
        bill_id = %bill.bill_id.value(),
        total_amount = %bill.result.total_amount,
        "Bill issued"
    );

    publish(deps, DomainEvent::BillGenerated(event)).await;

    Ok(BillOutcome::Issued(bill))
}
