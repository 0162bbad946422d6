//! Course entity model and DTOs.

use registrar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub course_code: String,
    pub course_name: String,
    pub course_description: Option<String>,
    pub credits: i32,
    pub department_id: DbId,
    pub instructor_name: Option<String>,
    pub max_students: i32,
    pub semester: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub course_code: String,
    pub course_name: String,
    pub course_description: Option<String>,
    pub credits: i32,
    pub department_id: DbId,
    pub instructor_name: Option<String>,
    /// Defaults to 50 if omitted.
    pub max_students: Option<i32>,
    pub semester: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating an existing course. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourse {
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub course_description: Option<String>,
    pub credits: Option<i32>,
    pub department_id: Option<DbId>,
    pub instructor_name: Option<String>,
    pub max_students: Option<i32>,
    pub semester: Option<String>,
    pub is_active: Option<bool>,
}
