//! Route definitions.
//!
//! Each resource module exposes a `router()` mounted under `/api/<resource>`;
//! handlers live in [`crate::handlers`].

pub mod addresses;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod fees;
pub mod health;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /departments   department CRUD + code lookup
/// /students      student CRUD + natural-key lookup, search, filter
/// /courses       course CRUD + activation, seat availability
/// /enrollments   enrollment CRUD + grade/attendance/withdraw rules, GPA
/// /addresses     address CRUD + primacy rule
/// /fees          fee CRUD + payments, summaries, overdue report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/departments", departments::router())
        .nest("/students", students::router())
        .nest("/courses", courses::router())
        .nest("/enrollments", enrollments::router())
        .nest("/addresses", addresses::router())
        .nest("/fees", fees::router())
}
