//! Route definitions for enrollments.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::enrollments;
use crate::state::AppState;

/// Routes mounted at `/enrollments`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create (duplicate + capacity rules)
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// PUT    /{id}/grade                    -> record_grade (forces Completed)
/// PUT    /{id}/attendance               -> record_attendance
/// POST   /{id}/withdraw                 -> withdraw
/// GET    /student/{student_id}          -> list_by_student
/// DELETE /student/{student_id}          -> delete_by_student
/// GET    /student/{student_id}/gpa      -> student_gpa
/// GET    /student/{student_id}/completed -> list_completed_by_student
/// GET    /course/{course_id}            -> list_by_course
/// GET    /status/{status}               -> list_by_status
/// GET    /can-enroll?student_id=&course_id= -> can_enroll
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(enrollments::list).post(enrollments::create))
        .route(
            "/{id}",
            get(enrollments::get_by_id)
                .put(enrollments::update)
                .delete(enrollments::delete),
        )
        .route("/{id}/grade", put(enrollments::record_grade))
        .route("/{id}/attendance", put(enrollments::record_attendance))
        .route("/{id}/withdraw", post(enrollments::withdraw))
        .route(
            "/student/{student_id}",
            get(enrollments::list_by_student).delete(enrollments::delete_by_student),
        )
        .route("/student/{student_id}/gpa", get(enrollments::student_gpa))
        .route(
            "/student/{student_id}/completed",
            get(enrollments::list_completed_by_student),
        )
        .route("/course/{course_id}", get(enrollments::list_by_course))
        .route("/status/{status}", get(enrollments::list_by_status))
        .route("/can-enroll", get(enrollments::can_enroll))
}
