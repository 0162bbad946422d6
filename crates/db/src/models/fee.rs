//! Fee entity model and DTOs.

use registrar_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `fees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fee {
    pub id: DbId,
    pub student_id: DbId,
    pub semester: String,
    pub fee_type: String,
    pub amount: Decimal,
    pub paid_amount: Decimal,
    pub due_date: Date,
    pub payment_date: Option<Date>,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new fee.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFee {
    pub student_id: DbId,
    pub semester: String,
    pub fee_type: String,
    pub amount: Decimal,
    /// Defaults to 0 if omitted.
    pub paid_amount: Option<Decimal>,
    pub due_date: Date,
    pub payment_date: Option<Date>,
    /// Defaults to `Pending` if omitted.
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
}

/// DTO for updating an existing fee. All fields are optional.
///
/// A full update is deliberately permissive: it may set any valid payment
/// status, including regressing a `Paid` fee. Only the payment operations
/// derive status from amounts.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFee {
    pub semester: Option<String>,
    pub fee_type: Option<String>,
    pub amount: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
    pub due_date: Option<Date>,
    pub payment_date: Option<Date>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
}

/// DTO for `POST /fees/{id}/payments`.
#[derive(Debug, Deserialize)]
pub struct RecordPayment {
    pub amount: Decimal,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
}

/// DTO for `POST /fees/{id}/pay-full`.
#[derive(Debug, Deserialize)]
pub struct SettlePayment {
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
}

/// DTO for `PUT /fees/{id}/payment-status`.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatus {
    pub payment_status: String,
}
