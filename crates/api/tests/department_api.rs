//! HTTP-level integration tests for department endpoints, including the
//! dependent-entity deletion guards.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_department_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/departments",
        serde_json::json!({
            "department_code": "D001",
            "department_name": "CompSci",
            "building": "Turing Hall",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["department_code"], "D001");
    assert_eq!(json["department_name"], "CompSci");
    assert!(json["id"].is_number());
    assert!(json["created_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_department_code_returns_409(pool: PgPool) {
    common::seed_department(&pool, "D001", "CompSci").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/departments",
        serde_json::json!({ "department_code": "D001", "department_name": "Other" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_department_by_code(pool: PgPool) {
    common::seed_department(&pool, "MATH", "Mathematics").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/departments/code/MATH").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["department_name"], "Mathematics");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_department_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/departments/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_department_keeps_own_code(pool: PgPool) {
    let id = common::seed_department(&pool, "D001", "CompSci").await;

    // Re-sending the same code must not trip the uniqueness check.
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/departments/{id}"),
        serde_json::json!({ "department_code": "D001", "department_name": "Computer Science" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["department_name"], "Computer Science");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_department_to_taken_code_returns_409(pool: PgPool) {
    common::seed_department(&pool, "D001", "CompSci").await;
    let other = common::seed_department(&pool, "D002", "Maths").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/departments/{other}"),
        serde_json::json!({ "department_code": "D001" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_department_returns_204(pool: PgPool) {
    let id = common::seed_department(&pool, "GONE", "Ephemeral Studies").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/departments/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/departments/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_department_with_students_blocked_until_student_removed(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;
    let student = common::seed_student(&pool, "S1", Some(dept)).await;

    // Guard: delete is a 409 while the student references the department.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/departments/{dept}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");

    // Remove the student, then the delete goes through.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/students/{student}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/departments/{dept}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_department_with_courses_returns_409(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;
    common::seed_course(&pool, "CS101", dept, 50).await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/departments/{dept}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
