//! Student entity model and DTOs.

use registrar_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub department_id: Option<DbId>,
    pub enrollment_date: Option<Date>,
    pub status: String,
    pub gpa: Option<Decimal>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new student.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub department_id: Option<DbId>,
    pub enrollment_date: Option<Date>,
    /// Defaults to `Active` if omitted.
    pub status: Option<String>,
    pub gpa: Option<Decimal>,
}

/// DTO for updating an existing student. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudent {
    pub student_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub department_id: Option<DbId>,
    pub enrollment_date: Option<Date>,
    pub status: Option<String>,
    pub gpa: Option<Decimal>,
}

/// Query parameters for `GET /students/search`.
#[derive(Debug, Deserialize)]
pub struct StudentSearchParams {
    pub keyword: Option<String>,
}

/// Query parameters for `GET /students/filter`.
///
/// Absent filters are no-ops; present filters combine conjunctively.
#[derive(Debug, Deserialize)]
pub struct StudentFilterParams {
    pub status: Option<String>,
    pub department_id: Option<DbId>,
    pub min_gpa: Option<Decimal>,
}

/// DTO for `PUT /students/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStudentStatus {
    pub status: String,
}
