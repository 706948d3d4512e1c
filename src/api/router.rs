use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, assess_damage, change_status, generate_bill, get_bill, get_payment,
    get_rental_by_id, get_rented_dates, list_damages, list_rentals, record_payment,
    report_damage, request_rental,
};

/// Creates the API router with all rental ledger endpoints
///
/// Command endpoints (Write operations):
/// - POST /rentals - Request a rental
/// - POST /rentals/:id/status - Approve, reject, complete or cancel
/// - POST /rentals/:id/bill - Issue the bill
/// - POST /rentals/:id/bill/payment - Pay the bill
/// - POST /rentals/:id/damages - Report damage
/// - POST /damages/:id/assess - Price a damage report
///
/// Query endpoints (Read operations):
/// - GET /rentals?requested_by= - Rentals of a requester
/// - GET /rentals/:id - Rental details
/// - GET /rentals/:id/bill - Bill of a rental
/// - GET /rentals/:id/bill/payment - Payment of a rental's bill
/// - GET /rentals/:id/damages - Damage reports of a rental
/// - GET /cars/:id/rented-dates - Days taken by approved rentals
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Rentals
        .route("/rentals", post(request_rental).get(list_rentals))
        .route("/rentals/:id", get(get_rental_by_id))
        .route("/rentals/:id/status", post(change_status))
        .route("/rentals/:id/bill", post(generate_bill).get(get_bill))
        .route(
            "/rentals/:id/bill/payment",
            post(record_payment).get(get_payment),
        )
        .route("/rentals/:id/damages", post(report_damage).get(list_damages))
        // Damage assessment
        .route("/damages/:id/assess", post(assess_damage))
        // Cars
        .route("/cars/:id/rented-dates", get(get_rented_dates))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
