//! Student status vocabulary and field validation.
//!
//! Student status is stored as TEXT; these constants define the closed set
//! of values the API accepts, and the validators used before every mutating
//! operation.

use crate::error::CoreError;

/// Default status for a newly created student.
pub const STATUS_ACTIVE: &str = "Active";
/// Student is on leave or otherwise not currently attending.
pub const STATUS_INACTIVE: &str = "Inactive";
/// Student has completed their program.
pub const STATUS_GRADUATED: &str = "Graduated";
/// Student is barred from enrollment pending review.
pub const STATUS_SUSPENDED: &str = "Suspended";

/// All valid student statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_ACTIVE,
    STATUS_INACTIVE,
    STATUS_GRADUATED,
    STATUS_SUSPENDED,
];

/// Validate that a status string is one of the known student statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid student status '{}'. Must be one of: {:?}",
            status, VALID_STATUSES
        )))
    }
}

/// Validate email syntax.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if validator::ValidateEmail::validate_email(&email) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid email address: '{email}'"
        )))
    }
}
