//! Fee vocabularies and payment arithmetic.
//!
//! A fee's payment status is derived, never free-floating: `Paid` iff the
//! paid amount equals the total, `Partial` iff something but not everything
//! has been paid, `Pending` otherwise. The payment operations guarantee
//! `0 <= paid_amount <= amount`; a full-record update deliberately bypasses
//! the derivation and may set any valid status.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Payment status
// ---------------------------------------------------------------------------

/// Nothing has been paid yet.
pub const PAYMENT_STATUS_PENDING: &str = "Pending";
/// Some but not all of the amount has been paid.
pub const PAYMENT_STATUS_PARTIAL: &str = "Partial";
/// The fee is fully covered.
pub const PAYMENT_STATUS_PAID: &str = "Paid";

/// All valid payment statuses.
pub const VALID_PAYMENT_STATUSES: &[&str] = &[
    PAYMENT_STATUS_PENDING,
    PAYMENT_STATUS_PARTIAL,
    PAYMENT_STATUS_PAID,
];

/// Statuses with an outstanding balance. Overdue and balance queries only
/// consider these; `Paid` fees are exactly covered by construction.
pub const OPEN_PAYMENT_STATUSES: &[&str] = &[PAYMENT_STATUS_PENDING, PAYMENT_STATUS_PARTIAL];

// ---------------------------------------------------------------------------
// Fee types and payment methods
// ---------------------------------------------------------------------------

/// All valid fee types.
pub const VALID_FEE_TYPES: &[&str] = &[
    "Tuition",
    "Hostel",
    "Library",
    "Lab",
    "Sports",
    "Transportation",
    "Other",
];

/// All valid payment methods.
pub const VALID_PAYMENT_METHODS: &[&str] = &["CASH", "CARD", "UPI", "BANK_TRANSFER", "CHEQUE"];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a payment status string is one of the known statuses.
pub fn validate_payment_status(status: &str) -> Result<(), CoreError> {
    if VALID_PAYMENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid payment status '{}'. Must be one of: {:?}",
            status, VALID_PAYMENT_STATUSES
        )))
    }
}

/// Validate that a fee type string is one of the known fee types.
pub fn validate_fee_type(fee_type: &str) -> Result<(), CoreError> {
    if VALID_FEE_TYPES.contains(&fee_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid fee type '{}'. Must be one of: {:?}",
            fee_type, VALID_FEE_TYPES
        )))
    }
}

/// Validate that a payment method string is one of the known methods.
pub fn validate_payment_method(method: &str) -> Result<(), CoreError> {
    if VALID_PAYMENT_METHODS.contains(&method) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid payment method '{}'. Must be one of: {:?}",
            method, VALID_PAYMENT_METHODS
        )))
    }
}

/// A payment must move money: zero and negative amounts are rejected.
pub fn validate_payment_amount(amount: Decimal) -> Result<(), CoreError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Payment amount must be greater than zero".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive the payment status from the amount and what has been paid.
pub fn derive_payment_status(amount: Decimal, paid_amount: Decimal) -> &'static str {
    if paid_amount == amount {
        PAYMENT_STATUS_PAID
    } else if paid_amount > Decimal::ZERO {
        PAYMENT_STATUS_PARTIAL
    } else {
        PAYMENT_STATUS_PENDING
    }
}

/// Remaining balance on a fee.
pub fn outstanding_balance(amount: Decimal, paid_amount: Decimal) -> Decimal {
    amount - paid_amount
}

/// Per-student fee totals returned by the summary endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct FeeSummary {
    pub total_fees: Decimal,
    pub total_paid: Decimal,
    pub outstanding_balance: Decimal,
    pub pending_count: i64,
}
