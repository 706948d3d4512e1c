use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::rental::BillOutcome;
use crate::domain::{
    Bill, DamageRecord, Payment, Quote, Rental, RentalStatus,
    commands::{AssessDamage, ChangeRentalStatus, RecordPayment, ReportDamage, RequestRental},
    value_objects::{CarId, DamageId, OfferId, RentalId, UserId},
};

// ============================================================================
// Requests
// ============================================================================

/// POST /rentals
#[derive(Debug, Serialize, Deserialize)]
pub struct RequestRentalRequest {
    pub car_id: Uuid,
    pub requested_by: Uuid,
    #[serde(default)]
    pub offer_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RequestRentalRequest {
    pub fn to_command(&self) -> RequestRental {
        RequestRental {
            car_id: CarId::from_uuid(self.car_id),
            requested_by: UserId::from_uuid(self.requested_by),
            offer_id: self.offer_id.map(OfferId::from_uuid),
            start_date: self.start_date,
            end_date: self.end_date,
            requested_at: Utc::now(),
        }
    }
}

/// POST /rentals/:id/status
#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
    pub changed_by: Uuid,
}

impl ChangeStatusRequest {
    /// Build the command; the status text is parsed case-insensitively
    pub fn to_command(&self, rental_id: Uuid) -> Result<ChangeRentalStatus, String> {
        Ok(ChangeRentalStatus {
            rental_id: RentalId::from_uuid(rental_id),
            new_status: self.status.parse::<RentalStatus>()?,
            changed_by: UserId::from_uuid(self.changed_by),
            changed_at: Utc::now(),
        })
    }
}

/// POST /rentals/:id/damages
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportDamageRequest {
    pub description: String,
    pub damaged_parts: String,
}

impl ReportDamageRequest {
    pub fn to_command(&self, rental_id: Uuid) -> ReportDamage {
        ReportDamage {
            rental_id: RentalId::from_uuid(rental_id),
            description: self.description.clone(),
            damaged_parts: self.damaged_parts.clone(),
            reported_at: Utc::now(),
        }
    }
}

/// POST /damages/:id/assess
#[derive(Debug, Serialize, Deserialize)]
pub struct AssessDamageRequest {
    pub repair_cost: Decimal,
    pub assessed_by: Uuid,
}

impl AssessDamageRequest {
    pub fn to_command(&self, damage_id: Uuid) -> AssessDamage {
        AssessDamage {
            damage_id: DamageId::from_uuid(damage_id),
            repair_cost: self.repair_cost,
            assessed_by: UserId::from_uuid(self.assessed_by),
        }
    }
}

/// POST /rentals/:id/bill/payment
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub paid_amount: Decimal,
    #[serde(default)]
    pub payment_method: Option<String>,
    pub recorded_by: Uuid,
}

impl RecordPaymentRequest {
    pub fn to_command(&self, rental_id: Uuid) -> RecordPayment {
        RecordPayment {
            rental_id: RentalId::from_uuid(rental_id),
            paid_amount: self.paid_amount,
            payment_method: self.payment_method.clone(),
            recorded_by: UserId::from_uuid(self.recorded_by),
            paid_at: Utc::now(),
        }
    }
}

/// Query parameters of GET /rentals
#[derive(Debug, Deserialize)]
pub struct ListRentalsQuery {
    /// Filter by requester (required)
    pub requested_by: Option<Uuid>,
    /// Filter by status
    pub status: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Rental as returned by every rental endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RentalResponse {
    pub rental_id: Uuid,
    pub car_id: Uuid,
    pub requested_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub offer_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            rental_id: rental.rental_id.value(),
            car_id: rental.car_id.value(),
            requested_by: rental.requested_by.value(),
            approved_by: rental.approved_by.map(|id| id.value()),
            offer_id: rental.offer_id.map(|id| id.value()),
            start_date: rental.date_range.start(),
            end_date: rental.date_range.end(),
            status: rental.status.as_str().to_string(),
            created_at: rental.created_at,
            updated_at: rental.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub rate: Decimal,
    pub days: i64,
    pub discount_percent: Decimal,
    pub total_price: Decimal,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            rate: quote.rate,
            days: quote.days,
            discount_percent: quote.discount_percent.value(),
            total_price: quote.total_price,
        }
    }
}

/// POST /rentals response
#[derive(Debug, Serialize, Deserialize)]
pub struct RentalRequestedResponse {
    pub rental: RentalResponse,
    pub quote: QuoteResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BillResponse {
    pub bill_id: Uuid,
    pub rental_id: Uuid,
    pub rate: Decimal,
    pub days: i64,
    pub discount_percent: Decimal,
    pub repair_cost: Decimal,
    pub total_amount: Decimal,
    pub issued_at: DateTime<Utc>,
    /// False when the bill had been issued by an earlier request
    #[serde(default)]
    pub newly_issued: bool,
    #[serde(default)]
    pub paid: bool,
}

impl From<Bill> for BillResponse {
    fn from(bill: Bill) -> Self {
        Self {
            bill_id: bill.bill_id.value(),
            rental_id: bill.rental_id.value(),
            rate: bill.result.rate,
            days: bill.result.days,
            discount_percent: bill.result.discount_percent.value(),
            repair_cost: bill.result.repair_cost,
            total_amount: bill.result.total_amount,
            issued_at: bill.issued_at,
            newly_issued: false,
            paid: false,
        }
    }
}

impl From<BillOutcome> for BillResponse {
    fn from(outcome: BillOutcome) -> Self {
        let newly_issued = matches!(outcome, BillOutcome::Issued(_));
        Self {
            newly_issued,
            ..BillResponse::from(outcome.into_bill())
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DamageResponse {
    pub damage_id: Uuid,
    pub rental_id: Uuid,
    pub description: String,
    pub damaged_parts: String,
    pub reported_at: DateTime<Utc>,
    pub repair_cost: Option<Decimal>,
    pub assessed_by: Option<Uuid>,
}

impl From<DamageRecord> for DamageResponse {
    fn from(record: DamageRecord) -> Self {
        Self {
            damage_id: record.damage_id.value(),
            rental_id: record.rental_id.value(),
            description: record.description,
            damaged_parts: record.damaged_parts,
            reported_at: record.reported_at,
            repair_cost: record.repair_cost,
            assessed_by: record.assessed_by.map(|id| id.value()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub payment_id: Uuid,
    pub bill_id: Uuid,
    pub rental_id: Uuid,
    pub paid_amount: Decimal,
    pub payment_method: String,
    pub customer_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub paid_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            payment_id: payment.payment_id.value(),
            bill_id: payment.bill_id.value(),
            rental_id: payment.rental_id.value(),
            paid_amount: payment.paid_amount,
            payment_method: payment.payment_method,
            customer_id: payment.customer_id.value(),
            employee_id: payment.employee_id.map(|id| id.value()),
            paid_at: payment.paid_at,
        }
    }
}

/// GET /cars/:id/rented-dates response
#[derive(Debug, Serialize, Deserialize)]
pub struct RentedDatesResponse {
    pub car_id: Uuid,
    pub dates: Vec<NaiveDate>,
}

/// Error body shared by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Parse and validate the status query parameter
pub fn parse_status_filter(status: &str) -> Result<RentalStatus, String> {
    status.parse::<RentalStatus>()
}
