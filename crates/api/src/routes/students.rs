//! Route definitions for students.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /                            -> list
/// POST   /                            -> create
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete
/// PUT    /{id}/status                 -> update_status
/// GET    /number/{student_number}     -> get_by_number
/// GET    /department/{department_id}  -> list_by_department
/// GET    /status/{status}             -> list_by_status
/// GET    /search?keyword=             -> search
/// GET    /filter?status=&department_id=&min_gpa= -> filter
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(students::list).post(students::create))
        .route(
            "/{id}",
            get(students::get_by_id)
                .put(students::update)
                .delete(students::delete),
        )
        .route("/{id}/status", put(students::update_status))
        .route("/number/{student_number}", get(students::get_by_number))
        .route(
            "/department/{department_id}",
            get(students::list_by_department),
        )
        .route("/status/{status}", get(students::list_by_status))
        .route("/search", get(students::search))
        .route("/filter", get(students::filter))
}
