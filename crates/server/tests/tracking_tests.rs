//! # Tracking Endpoint Tests
//!
//! Water, task and log endpoints against a mock database.

mod common;

use std::{collections::BTreeMap, sync::Arc};

use common::{UserFixture, app, fixed_now, init_test_env, json_request, mock_db, request, send, test_state, transaction_log};
use entity::{logs, sea_orm_active_enums::LogType, tasks, water_entries, water_settings};
use http::{Method, StatusCode};
use sea_orm::{MockExecResult, Value};
use serde_json::json;
use uuid::Uuid;

fn settings_row(user_id: Uuid) -> water_settings::Model {
    water_settings::Model {
        id: Uuid::new_v4(),
        user_id,
        cup_size_cc: water_settings::DEFAULT_CUP_SIZE_CC,
        daily_target_cc: water_settings::DEFAULT_DAILY_TARGET_CC,
        default_drink_cc: water_settings::DEFAULT_DRINK_CC,
        note: String::new(),
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

fn entry_row(user_id: Uuid, date: &str, time: &str, amount_cc: i32) -> water_entries::Model {
    water_entries::Model {
        id: Uuid::new_v4(),
        user_id,
        date: date.to_string(),
        amount_cc,
        time: time.to_string(),
        note: String::new(),
        created_at: fixed_now(),
    }
}

fn task_row(user_id: Uuid, completed: bool) -> tasks::Model {
    tasks::Model {
        id: Uuid::new_v4(),
        user_id,
        date: "2024-03-10".to_string(),
        title: "Walk 8000 steps".to_string(),
        exp: 20,
        completed,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

#[tokio::test]
async fn test_water_settings_created_with_defaults() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db()
        .append_query_results([Vec::<water_settings::Model>::new()])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected:  1,
        }])
        .append_query_results([vec![settings_row(user.id)]])
        .into_connection();
    let db = Arc::new(db);

    let (status, body) = send(
        app(test_state(Arc::clone(&db))),
        request(Method::GET, "/api/v1/water/settings", Some(&user.token())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cupSizeCc"], 300);
    assert_eq!(body["dailyTargetCc"], 1800);
    assert_eq!(body["defaultDrinkCc"], 250);

    let log = transaction_log(db);
    assert_eq!(log.len(), 3);
    assert!(format!("{:?}", log[1]).contains("ON CONFLICT"));
}

#[tokio::test]
async fn test_water_settings_update_is_single_upsert() {
    init_test_env();
    let user = UserFixture::new();
    let saved = water_settings::Model {
        daily_target_cc: 2400,
        ..settings_row(user.id)
    };
    let db = mock_db()
        .append_query_results([vec![saved]])
        .into_connection();
    let db = Arc::new(db);

    let (status, body) = send(
        app(test_state(Arc::clone(&db))),
        json_request(
            Method::PUT,
            "/api/v1/water/settings",
            Some(&user.token()),
            json!({"cupSizeCc": 300, "dailyTargetCc": 2400, "defaultDrinkCc": 250}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dailyTargetCc"], 2400);

    let log = transaction_log(db);
    assert_eq!(log.len(), 1);
    let statement = format!("{:?}", log[0]);
    assert!(statement.contains("ON CONFLICT"));
    assert!(statement.contains("DO UPDATE"));
}

#[tokio::test]
async fn test_water_settings_update_is_validated() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db().into_connection();
    let db = Arc::new(db);

    let (status, body) = send(
        app(test_state(Arc::clone(&db))),
        json_request(
            Method::PUT,
            "/api/v1/water/settings",
            Some(&user.token()),
            json!({"cupSizeCc": 0, "dailyTargetCc": 2000, "defaultDrinkCc": 250}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(transaction_log(db).is_empty());
}

#[tokio::test]
async fn test_water_entry_defaults_to_local_today() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db()
        .append_query_results([vec![entry_row(user.id, "2024-03-10", "08:15", 250)]])
        .into_connection();
    let db = Arc::new(db);

    let (status, body) = send(
        app(test_state(Arc::clone(&db))),
        json_request(
            Method::POST,
            "/api/v1/water/entries",
            Some(&user.token()),
            json!({"amountCc": 250, "time": "08:15"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["amountCc"], 250);

    let log = format!("{:?}", transaction_log(db));
    assert!(log.contains("2024-03-10"));
}

#[tokio::test]
async fn test_water_entry_rejects_bad_time() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db().into_connection();

    let (status, body) = send(
        app(test_state(db)),
        json_request(
            Method::POST,
            "/api/v1/water/entries",
            Some(&user.token()),
            json!({"amountCc": 250, "time": "8:15"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].as_str().unwrap().contains("HH:mm"));
}

#[tokio::test]
async fn test_water_entries_listed_for_date() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db()
        .append_query_results([vec![
            entry_row(user.id, "2024-03-01", "07:00", 300),
            entry_row(user.id, "2024-03-01", "12:30", 250),
        ]])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        request(
            Method::GET,
            "/api/v1/water/entries?date=2024-03-01",
            Some(&user.token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["time"], "07:00");
}

#[tokio::test]
async fn test_invalid_date_filter_is_rejected() {
    init_test_env();
    let user = UserFixture::new();

    let (status, body) = send(
        app(test_state(mock_db().into_connection())),
        request(Method::GET, "/api/v1/tasks?date=03/01/2024", Some(&user.token())),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_task_toggle_is_owner_scoped() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db()
        .append_query_results([Vec::<tasks::Model>::new()])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        json_request(
            Method::PATCH,
            &format!("/api/v1/tasks/{}", Uuid::new_v4()),
            Some(&user.token()),
            json!({"completed": true}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_task_toggle_updates_completion() {
    init_test_env();
    let user = UserFixture::new();
    let open = task_row(user.id, false);
    let mut done = open.clone();
    done.completed = true;
    let db = mock_db()
        .append_query_results([vec![open.clone()]])
        .append_query_results([vec![done]])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        json_request(
            Method::PATCH,
            &format!("/api/v1/tasks/{}", open.id),
            Some(&user.token()),
            json!({"completed": true}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], true);
    assert_eq!(body["exp"], 20);
}

#[tokio::test]
async fn test_create_task() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db()
        .append_query_results([vec![task_row(user.id, false)]])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        json_request(
            Method::POST,
            "/api/v1/tasks",
            Some(&user.token()),
            json!({"title": "Walk 8000 steps", "exp": 20}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["completed"], false);
}

#[tokio::test]
async fn test_log_payload_must_match_type() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db().into_connection();
    let db = Arc::new(db);

    let (status, body) = send(
        app(test_state(Arc::clone(&db))),
        json_request(
            Method::POST,
            "/api/v1/logs",
            Some(&user.token()),
            json!({"type": "weight", "time": "07:30", "data": {"sportType": "跑步"}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(transaction_log(db).is_empty());
}

#[tokio::test]
async fn test_create_sport_log() {
    init_test_env();
    let user = UserFixture::new();
    let stored = logs::Model {
        id:         Uuid::new_v4(),
        user_id:    user.id,
        log_type:   LogType::Sport,
        date:       "2024-03-09".to_string(),
        time:       "18:00".to_string(),
        data:       json!({"sportType": "跑步", "duration": 30.0}),
        created_at: fixed_now(),
    };
    let db = mock_db()
        .append_query_results([vec![stored]])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        json_request(
            Method::POST,
            "/api/v1/logs",
            Some(&user.token()),
            json!({"type": "sport", "date": "2024-03-09", "time": "18:00", "data": {"sportType": "跑步", "duration": 30}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], "sport");
    assert_eq!(body["data"]["sportType"], "跑步");
}

#[tokio::test]
async fn test_log_dates() {
    init_test_env();
    let user = UserFixture::new();
    let rows = ["2024-03-10", "2024-03-08"].map(|date| BTreeMap::from([("date", Value::from(date))]));
    let db = mock_db()
        .append_query_results([rows.to_vec()])
        .into_connection();

    let (status, body) = send(
        app(test_state(db)),
        request(Method::GET, "/api/v1/logs/dates", Some(&user.token())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["2024-03-10", "2024-03-08"]));
}

#[tokio::test]
async fn test_malformed_bodies_use_error_envelope() {
    init_test_env();
    let user = UserFixture::new();
    let db = mock_db().into_connection();
    let db = Arc::new(db);
    let token = user.token();

    let malformed = http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/tasks")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, format!("Bearer {}", token))
        .body(axum::body::Body::from("{\"title\": "))
        .unwrap();
    let (status, body) = send(app(test_state(Arc::clone(&db))), malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = send(
        app(test_state(Arc::clone(&db))),
        json_request(Method::POST, "/api/v1/tasks", Some(&token), json!({"exp": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "title: Missing required field");

    let (status, body) = send(
        app(test_state(Arc::clone(&db))),
        json_request(
            Method::PATCH,
            "/api/v1/tasks/not-a-uuid",
            Some(&token),
            json!({"completed": true}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    assert!(transaction_log(db).is_empty());
}
