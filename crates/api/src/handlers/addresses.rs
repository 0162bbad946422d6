//! Handlers for the `/addresses` resource.
//!
//! The primacy invariant (at most one primary address per student) is
//! maintained by the repository's transactional sweep; this layer validates
//! ownership and vocabulary before delegating.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registrar_core::address;
use registrar_core::error::CoreError;
use registrar_core::types::DbId;
use registrar_db::models::address::{Address, CreateAddress, SetPrimaryAddress, UpdateAddress};
use registrar_db::repositories::{AddressRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/addresses
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAddress>,
) -> AppResult<(StatusCode, Json<Address>)> {
    address::validate_address_type(&input.address_type)?;
    require_student(&state, input.student_id).await?;

    let created = AddressRepo::create(&state.pool, &input).await?;
    tracing::info!(
        id = created.id,
        student_id = created.student_id,
        is_primary = created.is_primary,
        "Address created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/addresses
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Address>>> {
    let addresses = AddressRepo::list(&state.pool).await?;
    Ok(Json(addresses))
}

/// GET /api/addresses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Address>> {
    let found = AddressRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Address",
            id,
        }))?;
    Ok(Json(found))
}

/// GET /api/addresses/student/{student_id}
pub async fn list_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<Vec<Address>>> {
    require_student(&state, student_id).await?;
    let addresses = AddressRepo::list_by_student(&state.pool, student_id).await?;
    Ok(Json(addresses))
}

/// GET /api/addresses/student/{student_id}/primary
pub async fn get_primary(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<Address>> {
    require_student(&state, student_id).await?;

    let primary = AddressRepo::find_primary(&state.pool, student_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Address",
                key: "primary for student",
                value: student_id.to_string(),
            })
        })?;
    Ok(Json(primary))
}

/// GET /api/addresses/city/{city}
pub async fn list_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<Vec<Address>>> {
    let addresses = AddressRepo::list_by_city(&state.pool, &city).await?;
    Ok(Json(addresses))
}

/// GET /api/addresses/state/{state}
pub async fn list_by_state(
    State(state): State<AppState>,
    Path(us_state): Path<String>,
) -> AppResult<Json<Vec<Address>>> {
    let addresses = AddressRepo::list_by_state(&state.pool, &us_state).await?;
    Ok(Json(addresses))
}

/// PUT /api/addresses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAddress>,
) -> AppResult<Json<Address>> {
    if let Some(address_type) = &input.address_type {
        address::validate_address_type(address_type)?;
    }

    let existing = AddressRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Address",
            id,
        }))?;

    let updated = AddressRepo::update(&state.pool, id, existing.student_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Address",
            id,
        }))?;
    Ok(Json(updated))
}

/// PUT /api/addresses/{id}/primary
///
/// Fails 403 when the address belongs to a different student than claimed.
pub async fn set_primary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetPrimaryAddress>,
) -> AppResult<Json<Address>> {
    let existing = AddressRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Address",
            id,
        }))?;

    if existing.student_id != input.student_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Address does not belong to student".to_string(),
        )));
    }

    let updated = AddressRepo::set_primary(&state.pool, id, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Address",
            id,
        }))?;
    tracing::info!(id, student_id = input.student_id, "Primary address set");
    Ok(Json(updated))
}

/// DELETE /api/addresses/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = AddressRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Address",
            id,
        }))
    }
}

/// DELETE /api/addresses/student/{student_id}
pub async fn delete_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_student(&state, student_id).await?;
    let removed = AddressRepo::delete_by_student(&state.pool, student_id).await?;
    tracing::info!(student_id, removed, "Addresses deleted for student");
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
