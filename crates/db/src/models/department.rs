//! Department entity model and DTOs.

use registrar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub department_code: String,
    pub department_name: String,
    pub head_of_department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub building: Option<String>,
    pub established_year: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new department.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartment {
    pub department_code: String,
    pub department_name: String,
    pub head_of_department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub building: Option<String>,
    pub established_year: Option<i32>,
}

/// DTO for updating an existing department. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDepartment {
    pub department_code: Option<String>,
    pub department_name: Option<String>,
    pub head_of_department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub building: Option<String>,
    pub established_year: Option<i32>,
}
