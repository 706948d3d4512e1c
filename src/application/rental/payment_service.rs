use crate::domain::{
    Bill, DomainEvent, Payment, Rental, RentalId, commands::RecordPayment, payment,
};
use crate::ports::DuplicatePayment;

use super::errors::{RentalApplicationError, Result};
use super::rental_service::{ServiceDependencies, load_rental, load_role, publish};

/// Record the payment of a rental's bill
///
/// Business rules:
/// - The rental must have a bill
/// - Customers only pay for their own rentals; staff and admins take payment
///   for anyone and are recorded as the receiving employee
/// - The paid amount equals the bill total
/// - A bill is paid once
pub async fn record_payment(deps: &ServiceDependencies, cmd: RecordPayment) -> Result<Payment> {
    // 1. Rental, bill and payer
    let (rental, role) = futures::try_join!(
        load_rental(&deps.rental_store, cmd.rental_id),
        load_role(&deps.user_directory, cmd.recorded_by),
    )?;

    if !role.is_employee() && cmd.recorded_by != rental.requested_by {
        return Err(RentalApplicationError::Forbidden(
            "Customers may only pay for their own rentals".to_string(),
        ));
    }

    let bill = load_bill(deps, &rental).await?;

    // 2. Has the bill been settled already?
    let existing = deps
        .payment_store
        .find_by_bill(bill.bill_id)
        .await
        .map_err(RentalApplicationError::PaymentStoreError)?;

    // 3. Pure domain function
    let employee_id = role.is_employee().then_some(cmd.recorded_by);
    let (payment, event) = payment::record_payment(
        &bill,
        existing.as_ref(),
        cmd.paid_amount,
        cmd.payment_method,
        rental.requested_by,
        employee_id,
        cmd.paid_at,
    )?;

    // 4. Persist; a concurrent payment of the same bill loses here
    deps.payment_store
        .save(payment.clone())
        .await
        .map_err(|e| {
            if e.is::<DuplicatePayment>() {
                RentalApplicationError::AlreadyPaid
            } else {
                RentalApplicationError::PaymentStoreError(e)
            }
        })?;

    tracing::info!(
        payment_id = %payment.payment_id.value(),
        bill_id = %payment.bill_id.value(),
        amount = %payment.paid_amount,
        "Payment recorded"
    );

    publish(deps, DomainEvent::PaymentRecorded(event)).await;

    Ok(payment)
}

/// The payment of a rental's bill, if it has been paid.
pub async fn find_payment(
    deps: &ServiceDependencies,
    rental_id: RentalId,
) -> Result<Option<Payment>> {
    let rental = load_rental(&deps.rental_store, rental_id).await?;
    let bill = load_bill(deps, &rental).await?;

    deps.payment_store
        .find_by_bill(bill.bill_id)
        .await
        .map_err(RentalApplicationError::PaymentStoreError)
}

async fn load_bill(deps: &ServiceDependencies, rental: &Rental) -> Result<Bill> {
    deps.bill_store
        .find_by_rental(rental.rental_id)
        .await
        .map_err(RentalApplicationError::BillStoreError)?
        .ok_or(RentalApplicationError::BillNotFound)
}
