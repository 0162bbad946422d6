//! Handlers for the `/departments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registrar_core::error::CoreError;
use registrar_core::types::DbId;
use registrar_db::models::department::{CreateDepartment, Department, UpdateDepartment};
use registrar_db::repositories::{CourseRepo, DepartmentRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/departments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    if DepartmentRepo::exists_by_code(&state.pool, &input.department_code).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Department code already exists: {}",
            input.department_code
        ))));
    }

    let department = DepartmentRepo::create(&state.pool, &input).await?;
    tracing::info!(id = department.id, code = %department.department_code, "Department created");
    Ok((StatusCode::CREATED, Json(department)))
}

/// GET /api/departments
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Department>>> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(departments))
}

/// GET /api/departments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Department>> {
    let department = DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;
    Ok(Json(department))
}

/// GET /api/departments/code/{code}
pub async fn get_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<Department>> {
    let department = DepartmentRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Department",
                key: "code",
                value: code.clone(),
            })
        })?;
    Ok(Json(department))
}

/// PUT /api/departments/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    if let Some(code) = &input.department_code {
        if DepartmentRepo::exists_by_code_excluding(&state.pool, code, id).await? {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Department code already exists: {code}"
            ))));
        }
    }

    let department = DepartmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;
    Ok(Json(department))
}

/// DELETE /api/departments/{id}
///
/// Blocked while the department still owns students or courses.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;

    let student_count = StudentRepo::count_by_department(&state.pool, id).await?;
    if student_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete department with {student_count} students"
        ))));
    }

    let course_count = CourseRepo::count_by_department(&state.pool, id).await?;
    if course_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete department with {course_count} courses"
        ))));
    }

    let deleted = DepartmentRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Department deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))
    }
}
