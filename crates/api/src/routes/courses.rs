//! Route definitions for courses.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                            -> list
/// POST   /                            -> create
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete (blocked while enrollments remain)
/// GET    /code/{course_code}          -> get_by_code
/// GET    /department/{department_id}  -> list_by_department
/// GET    /active                      -> list_active
/// GET    /available                   -> list_with_available_seats
/// GET    /{id}/seats                  -> seat_availability
/// POST   /{id}/activate               -> activate
/// POST   /{id}/deactivate             -> deactivate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list).post(courses::create))
        .route(
            "/{id}",
            get(courses::get_by_id)
                .put(courses::update)
                .delete(courses::delete),
        )
        .route("/code/{course_code}", get(courses::get_by_code))
        .route(
            "/department/{department_id}",
            get(courses::list_by_department),
        )
        .route("/active", get(courses::list_active))
        .route("/available", get(courses::list_with_available_seats))
        .route("/{id}/seats", get(courses::seat_availability))
        .route("/{id}/activate", post(courses::activate))
        .route("/{id}/deactivate", post(courses::deactivate))
}
