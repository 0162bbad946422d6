//! Handlers for the `/enrollments` resource.
//!
//! Enrollment creation enforces the duplicate and capacity rules; the
//! transactional insert in the repository serializes concurrent attempts,
//! and this layer turns its outcome into the matching domain error.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use registrar_core::course::has_available_seats;
use registrar_core::enrollment::{self, STATUS_WITHDRAWN};
use registrar_core::error::CoreError;
use registrar_core::types::DbId;
use rust_decimal::Decimal;
use serde::Serialize;
use registrar_db::models::enrollment::{
    CanEnrollParams, CreateEnrollment, Enrollment, RecordAttendance, RecordGrade, UpdateEnrollment,
};
use registrar_db::repositories::{CourseRepo, EnrollmentInsert, EnrollmentRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/enrollments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEnrollment>,
) -> AppResult<(StatusCode, Json<Enrollment>)> {
    if let Some(status) = &input.status {
        enrollment::validate_status(status)?;
    }

    StudentRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: input.student_id,
        }))?;
    CourseRepo::find_by_id(&state.pool, input.course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: input.course_id,
        }))?;

    match EnrollmentRepo::create(&state.pool, &input).await? {
        EnrollmentInsert::Created(enrollment) => {
            tracing::info!(
                id = enrollment.id,
                student_id = enrollment.student_id,
                course_id = enrollment.course_id,
                "Enrollment created"
            );
            Ok((StatusCode::CREATED, Json(enrollment)))
        }
        EnrollmentInsert::AlreadyEnrolled => Err(AppError::Core(CoreError::Conflict(
            "Student is already enrolled in this course".to_string(),
        ))),
        EnrollmentInsert::CourseFull => Err(AppError::Core(CoreError::Conflict(
            "Course is full. No available seats.".to_string(),
        ))),
    }
}

/// GET /api/enrollments
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Enrollment>>> {
    let enrollments = EnrollmentRepo::list(&state.pool).await?;
    Ok(Json(enrollments))
}

/// GET /api/enrollments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Enrollment>> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id,
        }))?;
    Ok(Json(enrollment))
}

/// GET /api/enrollments/student/{student_id}
pub async fn list_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<Vec<Enrollment>>> {
    require_student(&state, student_id).await?;
    let enrollments = EnrollmentRepo::list_by_student(&state.pool, student_id).await?;
    Ok(Json(enrollments))
}

/// GET /api/enrollments/course/{course_id}
pub async fn list_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<Vec<Enrollment>>> {
    CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;
    let enrollments = EnrollmentRepo::list_by_course(&state.pool, course_id).await?;
    Ok(Json(enrollments))
}

/// GET /api/enrollments/status/{status}
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Enrollment>>> {
    enrollment::validate_status(&status)?;
    let enrollments = EnrollmentRepo::list_by_status(&state.pool, &status).await?;
    Ok(Json(enrollments))
}

/// GET /api/enrollments/student/{student_id}/completed
pub async fn list_completed_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<Vec<Enrollment>>> {
    require_student(&state, student_id).await?;
    let enrollments = EnrollmentRepo::list_completed_by_student(&state.pool, student_id).await?;
    Ok(Json(enrollments))
}

/// Response payload for the GPA report.
#[derive(Serialize)]
pub struct GpaResponse {
    pub student_id: DbId,
    pub gpa: Decimal,
}

/// GET /api/enrollments/student/{student_id}/gpa
///
/// Average of grade points over graded enrollments; 0 when none exist.
pub async fn student_gpa(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<GpaResponse>> {
    require_student(&state, student_id).await?;

    let gpa = EnrollmentRepo::average_grade_points(&state.pool, student_id)
        .await?
        .unwrap_or(Decimal::ZERO);
    Ok(Json(GpaResponse { student_id, gpa }))
}

/// Response payload for the can-enroll predicate.
#[derive(Serialize)]
pub struct CanEnrollResponse {
    pub can_enroll: bool,
}

/// GET /api/enrollments/can-enroll?student_id=&course_id=
///
/// Pure predicate: false when the student is already enrolled or no seats
/// remain. Does not mutate.
pub async fn can_enroll(
    State(state): State<AppState>,
    Query(params): Query<CanEnrollParams>,
) -> AppResult<Json<CanEnrollResponse>> {
    if EnrollmentRepo::exists_by_student_and_course(&state.pool, params.student_id, params.course_id)
        .await?
    {
        return Ok(Json(CanEnrollResponse { can_enroll: false }));
    }

    let course = CourseRepo::find_by_id(&state.pool, params.course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: params.course_id,
        }))?;

    let enrolled = EnrollmentRepo::count_live_by_course(&state.pool, params.course_id).await?;
    Ok(Json(CanEnrollResponse {
        can_enroll: has_available_seats(enrolled, course.max_students),
    }))
}

/// PUT /api/enrollments/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEnrollment>,
) -> AppResult<Json<Enrollment>> {
    if let Some(status) = &input.status {
        enrollment::validate_status(status)?;
    }

    let enrollment = EnrollmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id,
        }))?;
    Ok(Json(enrollment))
}

/// PUT /api/enrollments/{id}/grade
///
/// Records a grade and forces the status to `Completed`. Grade text is
/// free-form by design.
pub async fn record_grade(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RecordGrade>,
) -> AppResult<Json<Enrollment>> {
    let enrollment =
        EnrollmentRepo::record_grade(&state.pool, id, &input.grade, input.grade_points)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Enrollment",
                id,
            }))?;
    tracing::info!(id, grade = %input.grade, "Grade recorded");
    Ok(Json(enrollment))
}

/// PUT /api/enrollments/{id}/attendance
///
/// Overwrites the attendance percentage unconditionally; range validity is
/// the caller's responsibility.
pub async fn record_attendance(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RecordAttendance>,
) -> AppResult<Json<Enrollment>> {
    let enrollment =
        EnrollmentRepo::record_attendance(&state.pool, id, input.attendance_percentage)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Enrollment",
                id,
            }))?;
    Ok(Json(enrollment))
}

/// POST /api/enrollments/{id}/withdraw
///
/// Sets the status to `Withdrawn`; capacity counts exclude withdrawn rows,
/// so the seat frees up for future enrollments.
pub async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Enrollment>> {
    let enrollment = EnrollmentRepo::update_status(&state.pool, id, STATUS_WITHDRAWN)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id,
        }))?;
    tracing::info!(id, "Enrollment withdrawn");
    Ok(Json(enrollment))
}

/// DELETE /api/enrollments/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = EnrollmentRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id,
        }))
    }
}

/// DELETE /api/enrollments/student/{student_id}
pub async fn delete_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_student(&state, student_id).await?;
    let removed = EnrollmentRepo::delete_by_student(&state.pool, student_id).await?;
    tracing::info!(student_id, removed, "Enrollments deleted for student");
    Ok(StatusCode::NO_CONTENT)
}

async fn require_student(state: &AppState, student_id: DbId) -> AppResult<()> {
    StudentRepo::find_by_id(&state.pool, student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: student_id,
        }))?;
    Ok(())
}
