//! Repository for the `courses` table.

use registrar_core::enrollment::STATUS_WITHDRAWN;
use registrar_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CreateCourse, UpdateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_code, course_name, course_description, credits, \
    department_id, instructor_name, max_students, semester, is_active, \
    created_at, updated_at";

/// Provides CRUD and query operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    ///
    /// If `max_students` is `None`, defaults to 50.
    /// If `is_active` is `None`, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses
                (course_code, course_name, course_description, credits,
                 department_id, instructor_name, max_students, semester, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 50), $8, COALESCE($9, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.course_code)
            .bind(&input.course_name)
            .bind(&input.course_description)
            .bind(input.credits)
            .bind(input.department_id)
            .bind(&input.instructor_name)
            .bind(input.max_students)
            .bind(&input.semester)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a course by its unique code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE course_code = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Whether any course uses the given code.
    pub async fn exists_by_code(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM courses WHERE course_code = $1)")
            .bind(code)
            .fetch_one(pool)
            .await
    }

    /// Whether a course *other than* `id` uses the given code.
    pub async fn exists_by_code_excluding(
        pool: &PgPool,
        code: &str,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM courses WHERE course_code = $1 AND id <> $2)",
        )
        .bind(code)
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// List all courses, ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses ORDER BY course_code");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// List courses offered by a department.
    pub async fn list_by_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM courses WHERE department_id = $1 ORDER BY course_code");
        sqlx::query_as::<_, Course>(&query)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// List active courses only.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE is_active ORDER BY course_code");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// List courses whose live enrollment count is below capacity.
    /// Withdrawn enrollments do not occupy a seat.
    pub async fn list_with_available_seats(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses c
             WHERE (SELECT COUNT(*) FROM enrollments e
                    WHERE e.course_id = c.id AND e.status <> $1) < c.max_students
             ORDER BY course_code"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(STATUS_WITHDRAWN)
            .fetch_all(pool)
            .await
    }

    /// Count courses offered by a department. Used by the department
    /// deletion guard.
    pub async fn count_by_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE department_id = $1")
            .bind(department_id)
            .fetch_one(pool)
            .await
    }

    /// Update a course. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                course_code = COALESCE($2, course_code),
                course_name = COALESCE($3, course_name),
                course_description = COALESCE($4, course_description),
                credits = COALESCE($5, credits),
                department_id = COALESCE($6, department_id),
                instructor_name = COALESCE($7, instructor_name),
                max_students = COALESCE($8, max_students),
                semester = COALESCE($9, semester),
                is_active = COALESCE($10, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.course_code)
            .bind(&input.course_name)
            .bind(&input.course_description)
            .bind(input.credits)
            .bind(input.department_id)
            .bind(&input.instructor_name)
            .bind(input.max_students)
            .bind(&input.semester)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Set the `is_active` flag. Returns `None` if the course is missing.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        is_active: bool,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET is_active = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course by ID. Returns `true` if a row was removed.
    ///
    /// The enrollment-count guard runs in the handler layer before this call;
    /// the foreign key on `enrollments` backstops it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
