//! Route definitions for fees.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::fees;
use crate::state::AppState;

/// Routes mounted at `/fees`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update (permissive full update)
/// DELETE /{id}                          -> delete
/// POST   /{id}/payments                 -> make_payment
/// POST   /{id}/pay-full                 -> make_full_payment
/// PUT    /{id}/payment-status           -> update_payment_status
/// GET    /payment-status/{status}       -> list_by_status
/// GET    /overdue                       -> list_overdue
/// GET    /semester/{semester}           -> list_by_semester
/// GET    /student/{student_id}          -> list_by_student
/// DELETE /student/{student_id}          -> delete_by_student
/// GET    /student/{student_id}/summary  -> student_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fees::list).post(fees::create))
        .route(
            "/{id}",
            get(fees::get_by_id).put(fees::update).delete(fees::delete),
        )
        .route("/{id}/payments", post(fees::make_payment))
        .route("/{id}/pay-full", post(fees::make_full_payment))
        .route("/{id}/payment-status", put(fees::update_payment_status))
        .route("/payment-status/{status}", get(fees::list_by_status))
        .route("/overdue", get(fees::list_overdue))
        .route("/semester/{semester}", get(fees::list_by_semester))
        .route(
            "/student/{student_id}",
            get(fees::list_by_student).delete(fees::delete_by_student),
        )
        .route("/student/{student_id}/summary", get(fees::student_summary))
}
