//! Repository for the `departments` table.

use registrar_core::types::DbId;
use sqlx::PgPool;

use crate::models::department::{CreateDepartment, Department, UpdateDepartment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, department_code, department_name, head_of_department, \
    email, phone, building, established_year, created_at, updated_at";

/// Provides CRUD operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a new department, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDepartment,
    ) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments
                (department_code, department_name, head_of_department,
                 email, phone, building, established_year)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(&input.department_code)
            .bind(&input.department_name)
            .bind(&input.head_of_department)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.building)
            .bind(input.established_year)
            .fetch_one(pool)
            .await
    }

    /// Find a department by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a department by its unique code.
    pub async fn find_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE department_code = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Whether any department uses the given code.
    pub async fn exists_by_code(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM departments WHERE department_code = $1)")
            .bind(code)
            .fetch_one(pool)
            .await
    }

    /// Whether a department *other than* `id` uses the given code.
    /// Used by update validation so a department may keep its own code.
    pub async fn exists_by_code_excluding(
        pool: &PgPool,
        code: &str,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM departments WHERE department_code = $1 AND id <> $2)",
        )
        .bind(code)
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// List all departments, ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments ORDER BY department_code");
        sqlx::query_as::<_, Department>(&query).fetch_all(pool).await
    }

    /// Update a department. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDepartment,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET
                department_code = COALESCE($2, department_code),
                department_name = COALESCE($3, department_name),
                head_of_department = COALESCE($4, head_of_department),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                building = COALESCE($7, building),
                established_year = COALESCE($8, established_year),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(&input.department_code)
            .bind(&input.department_name)
            .bind(&input.head_of_department)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.building)
            .bind(input.established_year)
            .fetch_optional(pool)
            .await
    }

    /// Delete a department by ID. Returns `true` if a row was removed.
    ///
    /// Dependent-entity guards run in the handler layer before this call;
    /// the foreign keys on `students`/`courses` backstop them.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
