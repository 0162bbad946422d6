//! Repository for the `enrollments` table.
//!
//! Enrollment creation is the one write with a real race: the capacity check
//! reads the live count and then inserts. [`EnrollmentRepo::create`] locks
//! the course row for the duration of the transaction so concurrent
//! enrollments into the same course serialize, and the
//! `(student_id, course_id)` unique constraint backstops the duplicate check.

use registrar_core::enrollment::{STATUS_COMPLETED, STATUS_WITHDRAWN};
use registrar_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::enrollment::{CreateEnrollment, Enrollment, UpdateEnrollment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, course_id, enrollment_date, grade, \
    grade_points, attendance_percentage, status, created_at, updated_at";

/// Outcome of an enrollment insert attempt.
///
/// Rule violations are data, not errors, at this layer; the handler decides
/// which `CoreError` (and HTTP status) each one becomes.
#[derive(Debug)]
pub enum EnrollmentInsert {
    Created(Enrollment),
    /// An enrollment for this (student, course) pair already exists,
    /// regardless of its status.
    AlreadyEnrolled,
    /// The course's live enrollment count has reached `max_students`.
    CourseFull,
}

/// Provides CRUD and rule-engine operations for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Insert a new enrollment after duplicate and capacity checks.
    ///
    /// Runs in a single transaction with the course row locked
    /// (`SELECT ... FOR UPDATE`), so two concurrent enrollments cannot both
    /// pass the capacity check. Defaults: `enrollment_date` today, `status`
    /// `'Enrolled'`. The caller is responsible for verifying the student and
    /// course exist beforehand.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEnrollment,
    ) -> Result<EnrollmentInsert, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let max_students: i32 =
            sqlx::query_scalar("SELECT max_students FROM courses WHERE id = $1 FOR UPDATE")
                .bind(input.course_id)
                .fetch_one(&mut *tx)
                .await?;

        let already_enrolled: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2)",
        )
        .bind(input.student_id)
        .bind(input.course_id)
        .fetch_one(&mut *tx)
        .await?;
        if already_enrolled {
            return Ok(EnrollmentInsert::AlreadyEnrolled);
        }

        let enrolled = Self::count_live_inner(&mut tx, input.course_id).await?;
        if !registrar_core::course::has_available_seats(enrolled, max_students) {
            return Ok(EnrollmentInsert::CourseFull);
        }

        let query = format!(
            "INSERT INTO enrollments
                (student_id, course_id, enrollment_date, grade, grade_points,
                 attendance_percentage, status)
             VALUES ($1, $2, COALESCE($3, CURRENT_DATE), $4, $5,
                     COALESCE($6, 0), COALESCE($7, 'Enrolled'))
             RETURNING {COLUMNS}"
        );
        let enrollment = sqlx::query_as::<_, Enrollment>(&query)
            .bind(input.student_id)
            .bind(input.course_id)
            .bind(input.enrollment_date)
            .bind(&input.grade)
            .bind(input.grade_points)
            .bind(input.attendance_percentage)
            .bind(&input.status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(EnrollmentInsert::Created(enrollment))
    }

    /// Find an enrollment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the student has an enrollment for the course, in any status.
    pub async fn exists_by_student_and_course(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
    }

    /// List all enrollments, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments ORDER BY created_at DESC");
        sqlx::query_as::<_, Enrollment>(&query).fetch_all(pool).await
    }

    /// List a student's enrollments.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE student_id = $1 ORDER BY id");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// List a course's enrollments.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE course_id = $1 ORDER BY id");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// List enrollments with the given status.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE status = $1 ORDER BY id");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List a student's graded enrollments (those with a recorded grade).
    pub async fn list_completed_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE student_id = $1 AND grade IS NOT NULL
             ORDER BY id"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Count a course's live enrollments (withdrawn rows do not hold a seat).
    pub async fn count_live_by_course(pool: &PgPool, course_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE course_id = $1 AND status <> $2")
            .bind(course_id)
            .bind(STATUS_WITHDRAWN)
            .fetch_one(pool)
            .await
    }

    /// Count all enrollments referencing a course, in any status. Used by
    /// the course deletion guard.
    pub async fn count_by_course(pool: &PgPool, course_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Count a student's enrollments.
    pub async fn count_by_student(pool: &PgPool, student_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE student_id = $1")
            .bind(student_id)
            .fetch_one(pool)
            .await
    }

    /// Average grade points over the student's graded enrollments, rounded
    /// to two places. `None` when no enrollment carries grade points.
    pub async fn average_grade_points(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Option<Decimal>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT ROUND(AVG(grade_points), 2) FROM enrollments
             WHERE student_id = $1 AND grade_points IS NOT NULL",
        )
        .bind(student_id)
        .fetch_one(pool)
        .await
    }

    /// Update an enrollment. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEnrollment,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET
                grade = COALESCE($2, grade),
                grade_points = COALESCE($3, grade_points),
                attendance_percentage = COALESCE($4, attendance_percentage),
                status = COALESCE($5, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(&input.grade)
            .bind(input.grade_points)
            .bind(input.attendance_percentage)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Record a grade, forcing the status to `Completed`.
    pub async fn record_grade(
        pool: &PgPool,
        id: DbId,
        grade: &str,
        grade_points: Option<Decimal>,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET grade = $2, grade_points = $3, status = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(grade)
            .bind(grade_points)
            .bind(STATUS_COMPLETED)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the attendance percentage.
    pub async fn record_attendance(
        pool: &PgPool,
        id: DbId,
        attendance_percentage: Decimal,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET attendance_percentage = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(attendance_percentage)
            .fetch_optional(pool)
            .await
    }

    /// Set only the enrollment status. Returns `None` if the row is missing.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an enrollment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all of a student's enrollments, returning how many were removed.
    pub async fn delete_by_student(pool: &PgPool, student_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enrollments WHERE student_id = $1")
            .bind(student_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count_live_inner(
        conn: &mut sqlx::PgConnection,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE course_id = $1 AND status <> $2")
            .bind(course_id)
            .bind(STATUS_WITHDRAWN)
            .fetch_one(conn)
            .await
    }
}
