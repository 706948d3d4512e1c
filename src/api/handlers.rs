use crate::application::rental::{
    BillOutcome, RentalApplicationError, ServiceDependencies,
    assess_damage as execute_assess_damage, change_rental_status as execute_change_status,
    find_payment as execute_find_payment, generate_bill as execute_generate_bill,
    record_payment as execute_record_payment, rented_dates as execute_rented_dates,
    report_damage as execute_report_damage, request_rental as execute_request_rental,
};
use crate::domain::{
    commands::GenerateBill,
    value_objects::{BillId, CarId, RentalId, UserId},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        AssessDamageRequest, BillResponse, ChangeStatusRequest, DamageResponse, ErrorResponse,
        ListRentalsQuery, PaymentResponse, RecordPaymentRequest, RentalRequestedResponse,
        RentalResponse, RentedDatesResponse, ReportDamageRequest, RequestRentalRequest,
        parse_status_filter,
    },
};

// ============================================================================
// State
// ============================================================================

/// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// Whether a bill has been paid
async fn is_paid(
    deps: &ServiceDependencies,
    bill_id: BillId,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    Ok(deps.payment_store.find_by_bill(bill_id).await?.is_some())
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /rentals - request a rental
///
/// Business rules enforced:
/// - The car, the requester and the offer (when given) must exist
/// - start_date must not be after end_date
/// - The car must be free on every requested day
pub async fn request_rental(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RequestRentalRequest>,
) -> Result<(StatusCode, Json<RentalRequestedResponse>), ApiError> {
    let (rental, quote) = execute_request_rental(&state.service_deps, req.to_command()).await?;

    let response = RentalRequestedResponse {
        rental: rental.into(),
        quote: quote.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /rentals/:id/status - move a rental to a new status
///
/// Business rules enforced:
/// - Customers may only cancel their own rentals
/// - Only allowed transitions are accepted
/// - Approval re-checks availability
pub async fn change_status(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<RentalResponse>, Response> {
    let cmd = req
        .to_command(rental_id)
        .map_err(|msg| QueryError::BadRequest(msg).into_response())?;

    let rental = execute_change_status(&state.service_deps, cmd)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    Ok(Json(rental.into()))
}

/// POST /rentals/:id/bill - issue the bill of a rental
///
/// 201 when a new bill is issued, 200 when the rental already had one.
pub async fn generate_bill(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
) -> Result<(StatusCode, Json<BillResponse>), ApiError> {
    let cmd = GenerateBill {
        rental_id: RentalId::from_uuid(rental_id),
        issued_at: chrono::Utc::now(),
    };

    let outcome = execute_generate_bill(&state.service_deps, cmd).await?;
    let (status, paid) = match &outcome {
        BillOutcome::Issued(_) => (StatusCode::CREATED, false),
        BillOutcome::AlreadyIssued(bill) => {
            let paid = is_paid(&state.service_deps, bill.bill_id)
                .await
                .map_err(RentalApplicationError::PaymentStoreError)?;
            (StatusCode::OK, paid)
        }
    };

    let response = BillResponse {
        paid,
        ..BillResponse::from(outcome)
    };
    Ok((status, Json(response)))
}

/// POST /rentals/:id/bill/payment - pay the bill of a rental
///
/// Business rules enforced:
/// - Customers may only pay for their own rentals
/// - The paid amount must equal the bill total
/// - A bill is paid once
pub async fn record_payment(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    let payment = execute_record_payment(&state.service_deps, req.to_command(rental_id)).await?;
    Ok((StatusCode::CREATED, Json(payment.into())))
}

/// POST /rentals/:id/damages - report damage found after a rental
pub async fn report_damage(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
    Json(req): Json<ReportDamageRequest>,
) -> Result<(StatusCode, Json<DamageResponse>), ApiError> {
    let record = execute_report_damage(&state.service_deps, req.to_command(rental_id)).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// POST /damages/:id/assess - price the repair of a damage report
pub async fn assess_damage(
    State(state): State<Arc<AppState>>,
    Path(damage_id): Path<Uuid>,
    Json(req): Json<AssessDamageRequest>,
) -> Result<Json<DamageResponse>, ApiError> {
    let record = execute_assess_damage(&state.service_deps, req.to_command(damage_id)).await?;
    Ok(Json(record.into()))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /rentals/:id - rental details
pub async fn get_rental_by_id(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
) -> Result<Json<RentalResponse>, QueryError> {
    let rental_id = RentalId::from_uuid(rental_id);

    match state.service_deps.rental_store.get_by_id(rental_id).await {
        Ok(Some(rental)) => Ok(Json(RentalResponse::from(rental))),
        Ok(None) => Err(QueryError::NotFound(format!(
            "Rental {} not found",
            rental_id.value()
        ))),
        Err(e) => Err(QueryError::InternalError(e.to_string())),
    }
}

/// GET /rentals - rentals of a requester, newest first
///
/// Query parameters:
/// - requested_by: requester ID (required)
/// - status: Waiting, Approved, Rejected, Cancelled or Completed (optional)
pub async fn list_rentals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListRentalsQuery>,
) -> Result<Json<Vec<RentalResponse>>, QueryError> {
    let requested_by = query.requested_by.ok_or_else(|| {
        QueryError::BadRequest("requested_by query parameter is required".to_string())
    })?;

    let status = query
        .status
        .as_deref()
        .map(parse_status_filter)
        .transpose()
        .map_err(QueryError::BadRequest)?;

    let rentals = state
        .service_deps
        .rental_store
        .find_by_requester(UserId::from_uuid(requested_by))
        .await
        .map_err(|e| QueryError::InternalError(e.to_string()))?;

    let rentals = rentals
        .into_iter()
        .filter(|rental| status.is_none_or(|s| rental.status == s))
        .map(RentalResponse::from)
        .collect();

    Ok(Json(rentals))
}

/// GET /rentals/:id/bill - the bill of a rental
pub async fn get_bill(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
) -> Result<Json<BillResponse>, QueryError> {
    let rental_id = RentalId::from_uuid(rental_id);

    let bill = match state.service_deps.bill_store.find_by_rental(rental_id).await {
        Ok(Some(bill)) => bill,
        Ok(None) => {
            return Err(QueryError::NotFound(format!(
                "No bill for rental {}",
                rental_id.value()
            )));
        }
        Err(e) => return Err(QueryError::InternalError(e.to_string())),
    };

    let paid = is_paid(&state.service_deps, bill.bill_id)
        .await
        .map_err(|e| QueryError::InternalError(e.to_string()))?;

    Ok(Json(BillResponse {
        paid,
        ..BillResponse::from(bill)
    }))
}

/// GET /rentals/:id/bill/payment - the payment of a rental's bill
pub async fn get_payment(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, Response> {
    let payment = execute_find_payment(&state.service_deps, RentalId::from_uuid(rental_id))
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    payment.map(|p| Json(p.into())).ok_or_else(|| {
        QueryError::NotFound(format!("Bill of rental {} is not paid", rental_id)).into_response()
    })
}

/// GET /rentals/:id/damages - damage reports of a rental, oldest first
pub async fn list_damages(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
) -> Result<Json<Vec<DamageResponse>>, QueryError> {
    let records = state
        .service_deps
        .damage_store
        .find_by_rental(RentalId::from_uuid(rental_id))
        .await
        .map_err(|e| QueryError::InternalError(e.to_string()))?;

    Ok(Json(records.into_iter().map(DamageResponse::from).collect()))
}

/// GET /cars/:id/rented-dates - days taken by approved rentals of a car
pub async fn get_rented_dates(
    State(state): State<Arc<AppState>>,
    Path(car_id): Path<Uuid>,
) -> Result<Json<RentedDatesResponse>, ApiError> {
    let dates = execute_rented_dates(&state.service_deps, CarId::from_uuid(car_id)).await?;

    Ok(Json(RentedDatesResponse { car_id, dates }))
}

// ============================================================================
// Error types
// ============================================================================

/// Error type for query handlers and request parsing
#[derive(Debug)]
pub enum QueryError {
    NotFound(String),
    BadRequest(String),
    InternalError(String),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            QueryError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            QueryError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            QueryError::InternalError(msg) => {
                // Details go to the log; the client only gets a generic message
                tracing::error!("Internal error in query handler: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
