//! Enrollment status vocabulary.
//!
//! An enrollment moves from `Enrolled` to `Completed` (when a grade is
//! recorded), `Withdrawn`, or `Failed`. Capacity counts treat `Withdrawn`
//! rows as vacated seats; see [`crate::course`] for the seat math.

use crate::error::CoreError;

/// Default status for a newly created enrollment.
pub const STATUS_ENROLLED: &str = "Enrolled";
/// A grade has been recorded for the enrollment.
pub const STATUS_COMPLETED: &str = "Completed";
/// The student withdrew; the seat is freed for future enrollments.
pub const STATUS_WITHDRAWN: &str = "Withdrawn";
/// The student did not pass the course.
pub const STATUS_FAILED: &str = "Failed";

/// All valid enrollment statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_ENROLLED,
    STATUS_COMPLETED,
    STATUS_WITHDRAWN,
    STATUS_FAILED,
];

/// Validate that a status string is one of the known enrollment statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid enrollment status '{}'. Must be one of: {:?}",
            status, VALID_STATUSES
        )))
    }
}
