//! Route definitions for student addresses.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::addresses;
use crate::state::AppState;

/// Routes mounted at `/addresses`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create (primacy sweep)
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update (primacy sweep)
/// DELETE /{id}                          -> delete
/// PUT    /{id}/primary                  -> set_primary (403 on foreign student)
/// GET    /student/{student_id}          -> list_by_student
/// DELETE /student/{student_id}          -> delete_by_student
/// GET    /student/{student_id}/primary  -> get_primary
/// GET    /city/{city}                   -> list_by_city
/// GET    /state/{state}                 -> list_by_state
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(addresses::list).post(addresses::create))
        .route(
            "/{id}",
            get(addresses::get_by_id)
                .put(addresses::update)
                .delete(addresses::delete),
        )
        .route("/{id}/primary", put(addresses::set_primary))
        .route(
            "/student/{student_id}",
            get(addresses::list_by_student).delete(addresses::delete_by_student),
        )
        .route(
            "/student/{student_id}/primary",
            get(addresses::get_primary),
        )
        .route("/city/{city}", get(addresses::list_by_city))
        .route("/state/{state}", get(addresses::list_by_state))
}
