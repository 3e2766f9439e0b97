//! # Member and Profile Tests

mod common;

use std::{collections::BTreeMap, sync::Arc};

use common::{TEST_PASSWORD, UserFixture, app, init_test_env, json_request, mock_db, request, send, test_state, transaction_log};
use http::{Method, StatusCode};
use sea_orm::{MockExecResult, Value};
use serde_json::json;
use uuid::Uuid;

fn count_row(count: i64) -> BTreeMap<&'static str, Value> { BTreeMap::from([("num_items", Value::BigInt(Some(count)))]) }

#[tokio::test]
async fn test_admin_lists_members() {
    init_test_env();
    let admin = UserFixture::admin();
    let member = UserFixture::new();
    let db = mock_db()
        .append_query_results([vec![member.model(), admin.model()]])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        request(Method::GET, "/api/v1/members", Some(&admin.token())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["username"], "amy");
}

#[tokio::test]
async fn test_admin_creates_member() {
    init_test_env();
    let admin = UserFixture::admin();
    let created = UserFixture::new().with_username("bo");
    let db = mock_db()
        .append_query_results([[count_row(0)]])
        .append_query_results([vec![created.model()]])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        json_request(
            Method::POST,
            "/api/v1/members",
            Some(&admin.token()),
            json!({"name": "Bo", "username": "bo", "role": "member", "status": "active"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "bo");
    assert!(body["avatar"].as_str().unwrap().contains("bo"));
}

#[tokio::test]
async fn test_duplicate_member_username_conflicts() {
    init_test_env();
    let admin = UserFixture::admin();
    let db = mock_db()
        .append_query_results([[count_row(1)]])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        json_request(
            Method::POST,
            "/api/v1/members",
            Some(&admin.token()),
            json!({"name": "Amy", "username": "amy", "role": "member", "status": "active"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_update_missing_member_is_not_found() {
    init_test_env();
    let admin = UserFixture::admin();
    let db = mock_db()
        .append_query_results([Vec::<entity::users::Model>::new()])
        .into_connection();

    let (status, _) = send(
        app(test_state(db)),
        json_request(
            Method::PUT,
            &format!("/api/v1/members/{}", Uuid::new_v4()),
            Some(&admin.token()),
            json!({"name": "Bo", "role": "admin", "status": "suspended"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_member_is_not_found() {
    init_test_env();
    let admin = UserFixture::admin();
    let db = mock_db()
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected:  0,
        }])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        request(
            Method::DELETE,
            &format!("/api/v1/members/{}", Uuid::new_v4()),
            Some(&admin.token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Member not found");
}

#[tokio::test]
async fn test_delete_member() {
    init_test_env();
    let admin = UserFixture::admin();
    let db = mock_db()
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected:  1,
        }])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        request(
            Method::DELETE,
            &format!("/api/v1/members/{}", Uuid::new_v4()),
            Some(&admin.token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_profile_username_taken_conflicts() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db()
        .append_query_results([[count_row(1)]])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        json_request(
            Method::PUT,
            "/api/v1/profile",
            Some(&user.token()),
            json!({"name": "Amy", "username": "admin"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username already taken");
}

#[tokio::test]
async fn test_username_availability() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db()
        .append_query_results([[count_row(0)]])
        .into_connection();
    let state = test_state(db);

    let (status, body) = send(
        app(state.clone()),
        request(
            Method::GET,
            "/api/v1/profile/username-available?username=newname",
            Some(&user.token()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);

    let (status, _) = send(
        app(state),
        request(
            Method::GET,
            "/api/v1/profile/username-available?username=%20",
            Some(&user.token()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_wrong_current_password_rejected() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db()
        .append_query_results([vec![user.model()]])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        json_request(
            Method::POST,
            "/api/v1/profile/password",
            Some(&user.token()),
            json!({"currentPassword": "not-my-password1", "newPassword": "brandnew2024"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Current password is incorrect");
}

#[tokio::test]
async fn test_weak_new_password_rejected_before_database() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db().into_connection();
    let db = Arc::new(db);

    let (status, body) = send(
        app(test_state(Arc::clone(&db))),
        json_request(
            Method::POST,
            "/api/v1/profile/password",
            Some(&user.token()),
            json!({"currentPassword": TEST_PASSWORD, "newPassword": "abc"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].as_str().unwrap().starts_with("newPassword"));
    assert!(transaction_log(db).is_empty());
}
