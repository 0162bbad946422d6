//! HTTP-level integration tests for course endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_empty, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_course_applies_defaults(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/courses",
        serde_json::json!({
            "course_code": "CS101",
            "course_name": "Intro to Programming",
            "credits": 3,
            "department_id": dept,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["max_students"], 50);
    assert_eq!(json["is_active"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_course_code_returns_409(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;
    common::seed_course(&pool, "CS101", dept, 50).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/courses",
        serde_json::json!({
            "course_code": "CS101",
            "course_name": "Duplicate",
            "credits": 3,
            "department_id": dept,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_course_with_unknown_department_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/courses",
        serde_json::json!({
            "course_code": "CS101",
            "course_name": "Orphan",
            "credits": 3,
            "department_id": 999_999,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_course_by_code(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;
    common::seed_course(&pool, "CS101", dept, 50).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/courses/code/CS101").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["course_code"], "CS101");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activate_deactivate_cycle(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;
    let id = common::seed_course(&pool, "CS101", dept, 50).await;

    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/courses/{id}/deactivate")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_active"], false);

    // Inactive courses drop out of the active listing.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/courses/active").await).await;
    assert_eq!(json.as_array().unwrap().len(), 0);

    let app = common::build_test_app(pool);
    let response = post_empty(app, &format!("/api/courses/{id}/activate")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_active"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_availability_report(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;
    let course = common::seed_course(&pool, "CS101", dept, 2).await;
    let student = common::seed_student(&pool, "S1", Some(dept)).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/enrollments",
        serde_json::json!({ "student_id": student, "course_id": course }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/courses/{course}/seats")).await).await;
    assert_eq!(json["enrolled_count"], 1);
    assert_eq!(json["max_students"], 2);
    assert_eq!(json["seats_remaining"], 1);
    assert_eq!(json["has_available_seats"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_available_listing_excludes_full_courses(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;
    let full = common::seed_course(&pool, "CS101", dept, 1).await;
    common::seed_course(&pool, "CS102", dept, 1).await;
    let student = common::seed_student(&pool, "S1", Some(dept)).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/enrollments",
        serde_json::json!({ "student_id": student, "course_id": full }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/courses/available").await).await;
    let codes: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["course_code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["CS102"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_course_with_enrollments_returns_409(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;
    let course = common::seed_course(&pool, "CS101", dept, 50).await;
    let student = common::seed_student(&pool, "S1", Some(dept)).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/enrollments",
        serde_json::json!({ "student_id": student, "course_id": course }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/courses/{course}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Empty courses delete cleanly.
    let other = common::seed_course(&pool, "CS999", dept, 10).await;
    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/courses/{other}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
