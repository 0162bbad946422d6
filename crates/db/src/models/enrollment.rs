//! Enrollment entity model and DTOs.

use registrar_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub student_id: DbId,
    pub course_id: DbId,
    pub enrollment_date: Date,
    pub grade: Option<String>,
    pub grade_points: Option<Decimal>,
    pub attendance_percentage: Decimal,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new enrollment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnrollment {
    pub student_id: DbId,
    pub course_id: DbId,
    /// Defaults to the current date if omitted.
    pub enrollment_date: Option<Date>,
    pub grade: Option<String>,
    pub grade_points: Option<Decimal>,
    pub attendance_percentage: Option<Decimal>,
    /// Defaults to `Enrolled` if omitted.
    pub status: Option<String>,
}

/// DTO for updating an existing enrollment. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEnrollment {
    pub grade: Option<String>,
    pub grade_points: Option<Decimal>,
    pub attendance_percentage: Option<Decimal>,
    pub status: Option<String>,
}

/// DTO for `PUT /enrollments/{id}/grade`.
///
/// Grade text is free-form; no format is enforced.
#[derive(Debug, Deserialize)]
pub struct RecordGrade {
    pub grade: String,
    pub grade_points: Option<Decimal>,
}

/// DTO for `PUT /enrollments/{id}/attendance`.
#[derive(Debug, Deserialize)]
pub struct RecordAttendance {
    pub attendance_percentage: Decimal,
}

/// Query parameters for `GET /enrollments/can-enroll`.
#[derive(Debug, Deserialize)]
pub struct CanEnrollParams {
    pub student_id: DbId,
    pub course_id: DbId,
}
