use crate::domain::{
    self, DomainEvent, Quote, Rental, RentalStatus, Reservation, availability, billing,
    commands::*, value_objects::*,
};
use crate::ports::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::errors::{RentalApplicationError, Result};

/// Service dependencies
///
/// Plain data with no behaviour; every collaborator is passed explicitly to
/// the use-case functions.
#[derive(Clone)]
pub struct ServiceDependencies {
    pub rental_store: Arc<dyn RentalStore>,
    pub bill_store: Arc<dyn BillStore>,
    pub damage_store: Arc<dyn DamageStore>,
    pub payment_store: Arc<dyn PaymentStore>,
    pub car_catalog: Arc<dyn CarCatalog>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub notification_service: Arc<dyn NotificationService>,
}

// ============================================================================
// Lookups shared by the use cases
// ============================================================================

pub(super) async fn load_rental(
    rental_store: &Arc<dyn RentalStore>,
    rental_id: RentalId,
) -> Result<Rental> {
    rental_store
        .get_by_id(rental_id)
        .await
        .map_err(RentalApplicationError::RentalStoreError)?
        .ok_or(RentalApplicationError::RentalNotFound)
}

pub(super) async fn load_car_rate(
    car_catalog: &Arc<dyn CarCatalog>,
    car_id: CarId,
) -> Result<Decimal> {
    car_catalog
        .get_car_rate(car_id)
        .await
        .map_err(RentalApplicationError::CarCatalogError)?
        .ok_or(RentalApplicationError::CarNotFound)
}

/// Discount of the offer attached to a rental; zero without an offer.
pub(super) async fn load_offer_discount(
    car_catalog: &Arc<dyn CarCatalog>,
    offer_id: Option<OfferId>,
) -> Result<Percent> {
    let Some(offer_id) = offer_id else {
        return Ok(Percent::ZERO);
    };

    car_catalog
        .get_offer_discount(offer_id)
        .await
        .map_err(RentalApplicationError::CarCatalogError)?
        .map(Percent::new)
        .ok_or(RentalApplicationError::OfferNotFound)
}

pub(super) async fn load_role(
    user_directory: &Arc<dyn UserDirectory>,
    user_id: UserId,
) -> Result<Role> {
    user_directory
        .get_role(user_id)
        .await
        .map_err(RentalApplicationError::UserDirectoryError)?
        .ok_or(RentalApplicationError::UserNotFound)
}

/// Approved snapshot of a car as availability reservations.
async fn load_approved(
    rental_store: &Arc<dyn RentalStore>,
    car_id: CarId,
) -> Result<Vec<Reservation>> {
    let approved = rental_store
        .list_approved(car_id)
        .await
        .map_err(RentalApplicationError::RentalStoreError)?;

    Ok(approved.iter().map(Rental::reservation).collect())
}

/// Save a rental; an approval that lost a race to an overlapping one is
/// reported as the car being unavailable.
async fn save_rental(rental_store: &Arc<dyn RentalStore>, rental: Rental) -> Result<Rental> {
    rental_store.save(rental).await.map_err(|e| {
        if e.is::<OverlappingApproval>() {
            RentalApplicationError::CarNotAvailable
        } else {
            RentalApplicationError::RentalStoreError(e)
        }
    })
}

/// Hand an event to the notification port.
///
/// Delivery failures are logged; the state change they report is already saved.
pub(super) async fn publish(deps: &ServiceDependencies, event: DomainEvent) {
    if let Err(e) = deps.notification_service.notify(&event).await {
        tracing::warn!(error = %e, ?event, "Failed to deliver notification");
    }
}

// ============================================================================
// Use cases
// ============================================================================

/// Request a rental
///
/// Business rules:
/// - The car, the requester and the offer (when given) must exist
/// - The requested days must not overlap an approved rental of the car
/// - The new rental waits for an employee's decision
///
/// # Returns
/// The saved rental and the request-time quote
pub async fn request_rental(
    deps: &ServiceDependencies,
    cmd: RequestRental,
) -> Result<(Rental, Quote)> {
    let date_range = DateRange::new(cmd.start_date, cmd.end_date)?;

    // 1. Prices and requester role
    let (rate, role, discount) = futures::try_join!(
        load_car_rate(&deps.car_catalog, cmd.car_id),
        load_role(&deps.user_directory, cmd.requested_by),
        load_offer_discount(&deps.car_catalog, cmd.offer_id),
    )?;

    // 2. Availability against the approved snapshot
    let approved = load_approved(&deps.rental_store, cmd.car_id).await?;
    if !availability::is_available(&approved, &date_range)? {
        return Err(RentalApplicationError::CarNotAvailable);
    }

    // 3. Pure domain functions
    let quote = billing::quote_rental(rate, cmd.start_date, cmd.end_date, discount, role)?;
    let (rental, event) = domain::rental::request_rental(
        cmd.car_id,
        cmd.requested_by,
        cmd.offer_id,
        date_range,
        cmd.requested_at,
    );

    // 4. Persist
    let rental = save_rental(&deps.rental_store, rental).await?;

    tracing::info!(
        rental_id = %rental.rental_id.value(),
        car_id = %rental.car_id.value(),
        total_price = %quote.total_price,
        "Rental requested"
    );

    publish(deps, DomainEvent::RentalRequested(event)).await;

    Ok((rental, quote))
}

/// Change the status of a rental
///
/// Business rules:
/// - Customers may only cancel, and only their own rentals
/// - Staff and admins may approve, reject, complete or cancel
/// - Approval re-checks availability against the approved rentals of the car
///
/// The approved snapshot is read right before the save; an approval that
/// races another overlapping one is rejected by the store on save.
pub async fn change_rental_status(
    deps: &ServiceDependencies,
    cmd: ChangeRentalStatus,
) -> Result<Rental> {
    let (rental, role) = futures::try_join!(
        load_rental(&deps.rental_store, cmd.rental_id),
        load_role(&deps.user_directory, cmd.changed_by),
    )?;

    if !domain::rental::can_change_status(role, cmd.new_status) {
        return Err(RentalApplicationError::Forbidden(format!(
            "{} may not set a rental to {}",
            role.as_str(),
            cmd.new_status
        )));
    }
    if role.is_customer() && rental.requested_by != cmd.changed_by {
        return Err(RentalApplicationError::Forbidden(
            "Customers may only cancel their own rentals".to_string(),
        ));
    }

    let approved = if cmd.new_status == RentalStatus::Approved {
        load_approved(&deps.rental_store, rental.car_id).await?
    } else {
        Vec::new()
    };

    let (updated, event) = domain::rental::change_status(
        &rental,
        cmd.new_status,
        cmd.changed_by,
        &approved,
        cmd.changed_at,
    )?;

    let updated = save_rental(&deps.rental_store, updated).await?;

    tracing::info!(
        rental_id = %updated.rental_id.value(),
        from = %event.old_status,
        to = %event.new_status,
        "Rental status changed"
    );

    publish(deps, DomainEvent::RentalStatusChanged(event)).await;

    Ok(updated)
}

/// Days on which a car is taken by approved rentals, in ascending order
pub async fn rented_dates(deps: &ServiceDependencies, car_id: CarId) -> Result<Vec<NaiveDate>> {
    load_car_rate(&deps.car_catalog, car_id).await?;
    let approved = load_approved(&deps.rental_store, car_id).await?;
    let days = availability::occupied_days(&approved)?;
    Ok(days.into_iter().collect())
}
