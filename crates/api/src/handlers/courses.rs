//! Handlers for the `/courses` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registrar_core::course::SeatAvailability;
use registrar_core::error::CoreError;
use registrar_core::types::DbId;
use registrar_db::models::course::{Course, CreateCourse, UpdateCourse};
use registrar_db::repositories::{CourseRepo, DepartmentRepo, EnrollmentRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/courses
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    if CourseRepo::exists_by_code(&state.pool, &input.course_code).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Course code already exists: {}",
            input.course_code
        ))));
    }

    let department = DepartmentRepo::find_by_id(&state.pool, input.department_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id: input.department_id,
        }))?;
    input.department_id = department.id;

    let course = CourseRepo::create(&state.pool, &input).await?;
    tracing::info!(id = course.id, code = %course.course_code, "Course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/courses
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Course>>> {
    let courses = CourseRepo::list(&state.pool).await?;
    Ok(Json(courses))
}

/// GET /api/courses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Course>> {
    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok(Json(course))
}

/// GET /api/courses/code/{course_code}
pub async fn get_by_code(
    State(state): State<AppState>,
    Path(course_code): Path<String>,
) -> AppResult<Json<Course>> {
    let course = CourseRepo::find_by_code(&state.pool, &course_code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Course",
                key: "code",
                value: course_code.clone(),
            })
        })?;
    Ok(Json(course))
}

/// GET /api/courses/department/{department_id}
pub async fn list_by_department(
    State(state): State<AppState>,
    Path(department_id): Path<DbId>,
) -> AppResult<Json<Vec<Course>>> {
    DepartmentRepo::find_by_id(&state.pool, department_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id: department_id,
        }))?;

    let courses = CourseRepo::list_by_department(&state.pool, department_id).await?;
    Ok(Json(courses))
}

/// GET /api/courses/active
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<Course>>> {
    let courses = CourseRepo::list_active(&state.pool).await?;
    Ok(Json(courses))
}

/// GET /api/courses/available
pub async fn list_with_available_seats(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Course>>> {
    let courses = CourseRepo::list_with_available_seats(&state.pool).await?;
    Ok(Json(courses))
}

/// GET /api/courses/{id}/seats
pub async fn seat_availability(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SeatAvailability>> {
    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    let enrolled = EnrollmentRepo::count_live_by_course(&state.pool, id).await?;
    Ok(Json(SeatAvailability::new(enrolled, course.max_students)))
}

/// PUT /api/courses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<Json<Course>> {
    if let Some(code) = &input.course_code {
        if CourseRepo::exists_by_code_excluding(&state.pool, code, id).await? {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Course code already exists: {code}"
            ))));
        }
    }
    if let Some(department_id) = input.department_id {
        DepartmentRepo::find_by_id(&state.pool, department_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Department",
                id: department_id,
            }))?;
    }

    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok(Json(course))
}

/// POST /api/courses/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Course>> {
    set_active_inner(&state, id, true).await
}

/// POST /api/courses/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Course>> {
    set_active_inner(&state, id, false).await
}

/// DELETE /api/courses/{id}
///
/// Blocked while any enrollment references the course.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    let enrollment_count = EnrollmentRepo::count_by_course(&state.pool, id).await?;
    if enrollment_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete course with {enrollment_count} enrollments"
        ))));
    }

    let deleted = CourseRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Course deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))
    }
}

async fn set_active_inner(state: &AppState, id: DbId, is_active: bool) -> AppResult<Json<Course>> {
    let course = CourseRepo::set_active(&state.pool, id, is_active)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    tracing::info!(id, is_active, "Course activation changed");
    Ok(Json(course))
}
