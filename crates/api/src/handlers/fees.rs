//! Handlers for the `/fees` resource.
//!
//! Payment operations validate amounts and methods up front, then delegate
//! to the repository's row-locked payment transactions. The plain update is
//! the permissive path: it may set any valid payment status, including
//! regressing a Paid fee.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registrar_core::error::CoreError;
use registrar_core::fee::{self, FeeSummary};
use registrar_core::types::DbId;
use registrar_db::models::fee::{
    CreateFee, Fee, RecordPayment, SettlePayment, UpdateFee, UpdatePaymentStatus,
};
use registrar_db::repositories::{FeeRepo, PaymentOutcome, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/fees
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<CreateFee>,
) -> AppResult<(StatusCode, Json<Fee>)> {
    fee::validate_fee_type(&input.fee_type)?;
    if let Some(status) = &input.payment_status {
        fee::validate_payment_status(status)?;
    }
    if let Some(method) = &input.payment_method {
        fee::validate_payment_method(method)?;
    }

    let student = StudentRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: input.student_id,
        }))?;
    input.student_id = student.id;

    let created = FeeRepo::create(&state.pool, &input).await?;
    tracing::info!(
        id = created.id,
        student_id = created.student_id,
        fee_type = %created.fee_type,
        "Fee created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/fees
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Fee>>> {
    let fees = FeeRepo::list(&state.pool).await?;
    Ok(Json(fees))
}

/// GET /api/fees/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Json<Fee>> {
    let found = FeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Fee", id }))?;
    Ok(Json(found))
}

/// GET /api/fees/student/{student_id}
pub async fn list_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<Vec<Fee>>> {
    require_student(&state, student_id).await?;
    let fees = FeeRepo::list_by_student(&state.pool, student_id).await?;
    Ok(Json(fees))
}

/// GET /api/fees/semester/{semester}
pub async fn list_by_semester(
    State(state): State<AppState>,
    Path(semester): Path<String>,
) -> AppResult<Json<Vec<Fee>>> {
    let fees = FeeRepo::list_by_semester(&state.pool, &semester).await?;
    Ok(Json(fees))
}

/// GET /api/fees/payment-status/{status}
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Fee>>> {
    fee::validate_payment_status(&status)?;
    let fees = FeeRepo::list_by_status(&state.pool, &status).await?;
    Ok(Json(fees))
}

/// GET /api/fees/overdue
///
/// Fees past their due date that are still Pending or Partial.
pub async fn list_overdue(State(state): State<AppState>) -> AppResult<Json<Vec<Fee>>> {
    let fees = FeeRepo::list_overdue(&state.pool).await?;
    Ok(Json(fees))
}

/// GET /api/fees/student/{student_id}/summary
pub async fn student_summary(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<FeeSummary>> {
    require_student(&state, student_id).await?;

    let total_fees = FeeRepo::total_amount_by_student(&state.pool, student_id).await?;
    let total_paid = FeeRepo::total_paid_by_student(&state.pool, student_id).await?;
    let outstanding_balance =
        FeeRepo::outstanding_balance_by_student(&state.pool, student_id).await?;
    let pending_count = FeeRepo::count_pending_by_student(&state.pool, student_id).await?;

    Ok(Json(FeeSummary {
        total_fees,
        total_paid,
        outstanding_balance,
        pending_count,
    }))
}

/// PUT /api/fees/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFee>,
) -> AppResult<Json<Fee>> {
    if let Some(fee_type) = &input.fee_type {
        fee::validate_fee_type(fee_type)?;
    }
    if let Some(status) = &input.payment_status {
        fee::validate_payment_status(status)?;
    }
    if let Some(method) = &input.payment_method {
        fee::validate_payment_method(method)?;
    }

    let updated = FeeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Fee", id }))?;
    Ok(Json(updated))
}

/// PUT /api/fees/{id}/payment-status
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePaymentStatus>,
) -> AppResult<Json<Fee>> {
    fee::validate_payment_status(&input.payment_status)?;

    let updated = FeeRepo::update_payment_status(&state.pool, id, &input.payment_status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Fee", id }))?;
    Ok(Json(updated))
}

/// POST /api/fees/{id}/payments
///
/// Applies a payment: rejects non-positive amounts, unknown methods, and
/// anything that would overpay the fee. Status is derived from the
/// resulting amounts.
pub async fn make_payment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RecordPayment>,
) -> AppResult<Json<Fee>> {
    fee::validate_payment_amount(input.amount)?;
    if let Some(method) = &input.payment_method {
        fee::validate_payment_method(method)?;
    }

    let outcome = FeeRepo::apply_payment(
        &state.pool,
        id,
        input.amount,
        input.payment_method.as_deref(),
        input.transaction_id.as_deref(),
    )
    .await?;

    match outcome {
        PaymentOutcome::Applied(updated) => {
            tracing::info!(
                id,
                amount = %input.amount,
                status = %updated.payment_status,
                "Payment recorded"
            );
            Ok(Json(updated))
        }
        PaymentOutcome::FeeMissing => {
            Err(AppError::Core(CoreError::NotFound { entity: "Fee", id }))
        }
        PaymentOutcome::ExceedsBalance => Err(AppError::Core(CoreError::Validation(
            "Payment amount exceeds outstanding balance".to_string(),
        ))),
        PaymentOutcome::AlreadyPaid => Err(AppError::Core(CoreError::Conflict(
            "Fee is already fully paid".to_string(),
        ))),
    }
}

/// POST /api/fees/{id}/pay-full
///
/// Settles the outstanding balance in one payment; fails 409 when nothing
/// is outstanding.
pub async fn make_full_payment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SettlePayment>,
) -> AppResult<Json<Fee>> {
    if let Some(method) = &input.payment_method {
        fee::validate_payment_method(method)?;
    }

    let outcome = FeeRepo::settle_in_full(
        &state.pool,
        id,
        input.payment_method.as_deref(),
        input.transaction_id.as_deref(),
    )
    .await?;

    match outcome {
        PaymentOutcome::Applied(updated) => {
            tracing::info!(id, amount = %updated.amount, "Fee settled in full");
            Ok(Json(updated))
        }
        PaymentOutcome::FeeMissing => {
            Err(AppError::Core(CoreError::NotFound { entity: "Fee", id }))
        }
        PaymentOutcome::AlreadyPaid => Err(AppError::Core(CoreError::Conflict(
            "Fee is already fully paid".to_string(),
        ))),
        PaymentOutcome::ExceedsBalance => Err(AppError::Core(CoreError::Validation(
            "Payment amount exceeds outstanding balance".to_string(),
        ))),
    }
}

/// DELETE /api/fees/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = FeeRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Fee", id }))
    }
}

/// DELETE /api/fees/student/{student_id}
pub async fn delete_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_student(&state, student_id).await?;
    let removed = FeeRepo::delete_by_student(&state.pool, student_id).await?;
    tracing::info!(student_id, removed, "Fees deleted for student");
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
