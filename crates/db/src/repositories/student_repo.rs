//! Repository for the `students` table.

use registrar_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::student::{CreateStudent, Student, UpdateStudent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_number, first_name, last_name, email, phone, \
    date_of_birth, gender, department_id, enrollment_date, status, gpa, \
    created_at, updated_at";

/// Provides CRUD and query operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    ///
    /// If `status` is `None`, defaults to `'Active'`.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students
                (student_number, first_name, last_name, email, phone,
                 date_of_birth, gender, department_id, enrollment_date, status, gpa)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 'Active'), $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.student_number)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(input.department_id)
            .bind(input.enrollment_date)
            .bind(&input.status)
            .bind(input.gpa)
            .fetch_one(pool)
            .await
    }

    /// Find a student by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a student by their unique student number.
    pub async fn find_by_number(
        pool: &PgPool,
        student_number: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE student_number = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(student_number)
            .fetch_optional(pool)
            .await
    }

    /// Whether any student uses the given student number.
    pub async fn exists_by_number(
        pool: &PgPool,
        student_number: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE student_number = $1)")
            .bind(student_number)
            .fetch_one(pool)
            .await
    }

    /// Whether a student *other than* `id` uses the given student number.
    pub async fn exists_by_number_excluding(
        pool: &PgPool,
        student_number: &str,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM students WHERE student_number = $1 AND id <> $2)",
        )
        .bind(student_number)
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Whether any student uses the given email.
    pub async fn exists_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Whether a student *other than* `id` uses the given email.
    pub async fn exists_by_email_excluding(
        pool: &PgPool,
        email: &str,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE email = $1 AND id <> $2)")
            .bind(email)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List all students, ordered by student number.
    pub async fn list(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students ORDER BY student_number");
        sqlx::query_as::<_, Student>(&query).fetch_all(pool).await
    }

    /// List students in a department.
    pub async fn list_by_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students WHERE department_id = $1 ORDER BY student_number"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// List students with the given status.
    pub async fn list_by_status(pool: &PgPool, status: &str) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE status = $1 ORDER BY student_number");
        sqlx::query_as::<_, Student>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over first name, last name, email
    /// and student number.
    pub async fn search(pool: &PgPool, keyword: &str) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students
             WHERE first_name ILIKE $1
                OR last_name ILIKE $1
                OR email ILIKE $1
                OR student_number ILIKE $1
             ORDER BY student_number"
        );
        let pattern = format!("%{}%", keyword.replace('%', "\\%").replace('_', "\\_"));
        sqlx::query_as::<_, Student>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Conjunctive filter by status, department and minimum GPA.
    /// `None` filters are no-ops.
    pub async fn filter(
        pool: &PgPool,
        status: Option<&str>,
        department_id: Option<DbId>,
        min_gpa: Option<Decimal>,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::bigint IS NULL OR department_id = $2)
               AND ($3::numeric IS NULL OR gpa >= $3)
             ORDER BY student_number"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(status)
            .bind(department_id)
            .bind(min_gpa)
            .fetch_all(pool)
            .await
    }

    /// Count students belonging to a department. Used by the department
    /// deletion guard.
    pub async fn count_by_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE department_id = $1")
            .bind(department_id)
            .fetch_one(pool)
            .await
    }

    /// Update a student. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                student_number = COALESCE($2, student_number),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                date_of_birth = COALESCE($7, date_of_birth),
                gender = COALESCE($8, gender),
                department_id = COALESCE($9, department_id),
                enrollment_date = COALESCE($10, enrollment_date),
                status = COALESCE($11, status),
                gpa = COALESCE($12, gpa),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.student_number)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(input.department_id)
            .bind(input.enrollment_date)
            .bind(&input.status)
            .bind(input.gpa)
            .fetch_optional(pool)
            .await
    }

    /// Set only the student's status. Returns `None` if the student is missing.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a student by ID. Returns `true` if a row was removed.
    ///
    /// Does not cascade; dependent addresses/enrollments/fees must be removed
    /// first (their foreign keys reject the delete otherwise).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
