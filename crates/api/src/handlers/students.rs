//! Handlers for the `/students` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use registrar_core::error::CoreError;
use registrar_core::student;
use registrar_core::types::DbId;
use registrar_db::models::student::{
    CreateStudent, Student, StudentFilterParams, StudentSearchParams, UpdateStudent,
    UpdateStudentStatus,
};
use registrar_db::repositories::{DepartmentRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/students
///
/// Natural keys (student number, email) must be unused, the email must be
/// syntactically valid, and any referenced department must exist.
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    student::validate_email(&input.email)?;
    if let Some(status) = &input.status {
        student::validate_status(status)?;
    }

    if StudentRepo::exists_by_number(&state.pool, &input.student_number).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Student number already exists: {}",
            input.student_number
        ))));
    }
    if StudentRepo::exists_by_email(&state.pool, &input.email).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Email already exists: {}",
            input.email
        ))));
    }

    // Resolve the department reference to the stored record rather than
    // trusting caller input.
    if let Some(department_id) = input.department_id {
        let department = DepartmentRepo::find_by_id(&state.pool, department_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Department",
                id: department_id,
            }))?;
        input.department_id = Some(department.id);
    }

    let student = StudentRepo::create(&state.pool, &input).await?;
    tracing::info!(id = student.id, number = %student.student_number, "Student created");
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/students
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Student>>> {
    let students = StudentRepo::list(&state.pool).await?;
    Ok(Json(students))
}

/// GET /api/students/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Student>> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    Ok(Json(student))
}

/// GET /api/students/number/{student_number}
pub async fn get_by_number(
    State(state): State<AppState>,
    Path(student_number): Path<String>,
) -> AppResult<Json<Student>> {
    let student = StudentRepo::find_by_number(&state.pool, &student_number)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Student",
                key: "student number",
                value: student_number.clone(),
            })
        })?;
    Ok(Json(student))
}

/// GET /api/students/department/{department_id}
pub async fn list_by_department(
    State(state): State<AppState>,
    Path(department_id): Path<DbId>,
) -> AppResult<Json<Vec<Student>>> {
    DepartmentRepo::find_by_id(&state.pool, department_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id: department_id,
        }))?;

    let students = StudentRepo::list_by_department(&state.pool, department_id).await?;
    Ok(Json(students))
}

/// GET /api/students/status/{status}
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Student>>> {
    student::validate_status(&status)?;
    let students = StudentRepo::list_by_status(&state.pool, &status).await?;
    Ok(Json(students))
}

/// GET /api/students/search?keyword=
///
/// An absent or blank keyword returns all students.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<StudentSearchParams>,
) -> AppResult<Json<Vec<Student>>> {
    let keyword = params.keyword.as_deref().map(str::trim).unwrap_or("");
    let students = if keyword.is_empty() {
        StudentRepo::list(&state.pool).await?
    } else {
        StudentRepo::search(&state.pool, keyword).await?
    };
    Ok(Json(students))
}

/// GET /api/students/filter?status=&department_id=&min_gpa=
///
/// Each filter is independently optional; present filters are conjunctive.
pub async fn filter(
    State(state): State<AppState>,
    Query(params): Query<StudentFilterParams>,
) -> AppResult<Json<Vec<Student>>> {
    if let Some(status) = &params.status {
        student::validate_status(status)?;
    }

    let students = StudentRepo::filter(
        &state.pool,
        params.status.as_deref(),
        params.department_id,
        params.min_gpa,
    )
    .await?;
    Ok(Json(students))
}

/// PUT /api/students/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<Json<Student>> {
    StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;

    if let Some(number) = &input.student_number {
        if StudentRepo::exists_by_number_excluding(&state.pool, number, id).await? {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Student number already exists: {number}"
            ))));
        }
    }
    if let Some(email) = &input.email {
        student::validate_email(email)?;
        if StudentRepo::exists_by_email_excluding(&state.pool, email, id).await? {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Email already exists: {email}"
            ))));
        }
    }
    if let Some(status) = &input.status {
        student::validate_status(status)?;
    }
    if let Some(department_id) = input.department_id {
        DepartmentRepo::find_by_id(&state.pool, department_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Department",
                id: department_id,
            }))?;
    }

    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    Ok(Json(student))
}

/// PUT /api/students/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudentStatus>,
) -> AppResult<Json<Student>> {
    student::validate_status(&input.status)?;

    let student = StudentRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    tracing::info!(id, status = %student.status, "Student status updated");
    Ok(Json(student))
}

/// DELETE /api/students/{id}
///
/// Does not cascade: remaining addresses/enrollments/fees make the delete
/// fail on their foreign keys (surfaced as 409). Callers wanting a cascade
/// use the per-resource `delete-all-by-student` endpoints first.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = StudentRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Student deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))
    }
}
