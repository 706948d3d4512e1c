use crate::application::rental::RentalApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API layer error
///
/// Wraps application errors and maps them to HTTP responses.
#[derive(Debug)]
pub struct ApiError(RentalApplicationError);

impl From<RentalApplicationError> for ApiError {
    fn from(err: RentalApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let (status, error_type) = match self.0 {
            // 404 Not Found - the addressed resource does not exist
            RentalApplicationError::RentalNotFound => (StatusCode::NOT_FOUND, "RENTAL_NOT_FOUND"),
            RentalApplicationError::DamageNotFound => (StatusCode::NOT_FOUND, "DAMAGE_NOT_FOUND"),
            RentalApplicationError::BillNotFound => (StatusCode::NOT_FOUND, "BILL_NOT_FOUND"),

            // 403 Forbidden - role does not allow the operation
            RentalApplicationError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),

            // 422 Unprocessable Entity - business rule violations
            RentalApplicationError::InvalidRange(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_RANGE")
            }
            RentalApplicationError::InvalidTransition { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_TRANSITION")
            }
            RentalApplicationError::CarNotAvailable => {
                (StatusCode::UNPROCESSABLE_ENTITY, "CAR_NOT_AVAILABLE")
            }
            RentalApplicationError::NegativeAmount => {
                (StatusCode::UNPROCESSABLE_ENTITY, "NEGATIVE_AMOUNT")
            }
            RentalApplicationError::CarNotFound => {
                (StatusCode::UNPROCESSABLE_ENTITY, "CAR_NOT_FOUND")
            }
            RentalApplicationError::OfferNotFound => {
                (StatusCode::UNPROCESSABLE_ENTITY, "OFFER_NOT_FOUND")
            }
            RentalApplicationError::UserNotFound => {
                (StatusCode::UNPROCESSABLE_ENTITY, "USER_NOT_FOUND")
            }
            RentalApplicationError::AlreadyPaid => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ALREADY_PAID")
            }
            RentalApplicationError::AmountMismatch { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "AMOUNT_MISMATCH")
            }

            // 500 Internal Server Error - port failures
            // Details go to the log; the client only gets a generic message
            RentalApplicationError::RentalStoreError(ref e) => {
                return internal_error("RENTAL_STORE_ERROR", "Rental store error", e.as_ref());
            }
            RentalApplicationError::BillStoreError(ref e) => {
                return internal_error("BILL_STORE_ERROR", "Bill store error", e.as_ref());
            }
            RentalApplicationError::DamageStoreError(ref e) => {
                return internal_error("DAMAGE_STORE_ERROR", "Damage store error", e.as_ref());
            }
            RentalApplicationError::PaymentStoreError(ref e) => {
                return internal_error("PAYMENT_STORE_ERROR", "Payment store error", e.as_ref());
            }
            RentalApplicationError::CarCatalogError(ref e) => {
                return internal_error("CAR_CATALOG_ERROR", "Car catalog error", e.as_ref());
            }
            RentalApplicationError::UserDirectoryError(ref e) => {
                return internal_error("USER_DIRECTORY_ERROR", "User directory error", e.as_ref());
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

fn internal_error(
    error_type: &str,
    message: &str,
    source: &(dyn std::error::Error + Send + Sync),
) -> Response {
    tracing::error!(error = %source, "{}", message);
    let body = Json(ErrorResponse::new(error_type, message));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
