//! HTTP-level integration tests for student endpoints: natural-key
//! uniqueness, email validation, search and filtering.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

fn student_body(number: &str, email: &str, department_id: Option<i64>) -> serde_json::Value {
    serde_json::json!({
        "student_number": number,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "department_id": department_id,
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_student_defaults_to_active(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/students",
        student_body("S1001", "ada@university.edu", Some(dept)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "Active");
    assert_eq!(json["student_number"], "S1001");
    assert_eq!(json["department_id"], dept);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_student_number_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/students",
        student_body("S1001", "first@university.edu", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/students",
        student_body("S1001", "second@university.edu", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/students",
        student_body("S1001", "shared@university.edu", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/students",
        student_body("S1002", "shared@university.edu", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_email_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/students", student_body("S1001", "nope", None)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_student_with_unknown_department_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/students",
        student_body("S1001", "ada@university.edu", Some(999_999)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_student_by_id_is_idempotent(pool: PgPool) {
    let id = common::seed_student(&pool, "S1001", None).await;

    let app = common::build_test_app(pool.clone());
    let first = body_json(get(app, &format!("/api/students/{id}")).await).await;
    let app = common::build_test_app(pool);
    let second = body_json(get(app, &format!("/api/students/{id}")).await).await;

    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_student_by_number(pool: PgPool) {
    common::seed_student(&pool, "S1001", None).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/students/number/S1001").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["student_number"], "S1001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_unknown_status_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/students/status/Expelled").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_name_email_and_number(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/students",
        serde_json::json!({
            "student_number": "S2001",
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "ghopper@university.edu",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    common::seed_student(&pool, "S2002", None).await;

    // Case-insensitive substring on last name.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/students/search?keyword=hopp").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["first_name"], "Grace");

    // Student number match.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/students/search?keyword=s2002").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    // Blank keyword returns everyone.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/students/search").await).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_is_conjunctive_and_optional(pool: PgPool) {
    let dept = common::seed_department(&pool, "D001", "CompSci").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/students",
        serde_json::json!({
            "student_number": "S3001",
            "first_name": "High",
            "last_name": "Achiever",
            "email": "high@university.edu",
            "department_id": dept,
            "gpa": 3.9,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/students",
        serde_json::json!({
            "student_number": "S3002",
            "first_name": "Low",
            "last_name": "Flyer",
            "email": "low@university.edu",
            "department_id": dept,
            "gpa": 2.1,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // No filters: both students.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/students/filter").await).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    // min_gpa alone.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/students/filter?min_gpa=3.5").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["student_number"], "S3001");

    // Conjunction: matching department but unmatched GPA yields nothing.
    let app = common::build_test_app(pool);
    let uri = format!("/api/students/filter?department_id={dept}&min_gpa=4.0");
    let json = body_json(get(app, &uri).await).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_status_endpoint(pool: PgPool) {
    let id = common::seed_student(&pool, "S1001", None).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/students/{id}/status"),
        serde_json::json!({ "status": "Graduated" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "Graduated");

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/students/{id}/status"),
        serde_json::json!({ "status": "OnSabbatical" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_student_returns_204(pool: PgPool) {
    let id = common::seed_student(&pool, "S1001", None).await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/students/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_student_with_dependents_returns_409(pool: PgPool) {
    let id = common::seed_student(&pool, "S1001", None).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/addresses",
        serde_json::json!({ "student_id": id, "address_type": "Permanent" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // No cascade: the address foreign key blocks the delete.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/students/{id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Explicit cascade, then the delete succeeds.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/addresses/student/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/students/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
