//! End-to-end flows against a real Postgres database.
//!
//! Run with `DATABASE_URL` pointing at a server `sqlx::test` may create
//! scratch databases on, then `cargo test -- --ignored`.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use oil_routes::config::database::DatabaseConfig;
use oil_routes::config::environment::EnvironmentConfig;
use oil_routes::utils::jwt::generate_token;
use oil_routes::{create_app, AppState};

fn state(pool: PgPool) -> AppState {
    let config = EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        database: DatabaseConfig::default(),
        jwt_secret: "flow-test-secret".to_string(),
        jwt_expiration: 3600,
        cors_origins: Vec::new(),
    };
    AppState::new(pool, config)
}

async fn call(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

struct Fixture {
    definition_id: i64,
    vehicle_id: i64,
    site_id: i64,
    route_id: i64,
    stop_ids: Vec<i64>,
}

/// A vehicle with a route today and three stops inserted out of order
async fn seed_today(pool: &PgPool) -> Fixture {
    let (customer_id,): (i64,) = sqlx::query_as(
        "INSERT INTO customers (name, contact_email) VALUES ('The Chip Shop', 'chips@example.com') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let (site_id,): (i64,) = sqlx::query_as(
        "INSERT INTO sites (customer_id, address_line_1, city, postcode) VALUES ($1, '1 High St', 'Cardiff', 'CF10 1AA') RETURNING id",
    )
    .bind(customer_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let (definition_id,): (i64,) = sqlx::query_as("INSERT INTO route_definitions (name) VALUES ('Monday North') RETURNING id")
        .fetch_one(pool)
        .await
        .unwrap();

    let (vehicle_id,): (i64,) =
        sqlx::query_as("INSERT INTO vehicles (registration_number, nickname) VALUES ('CF21ABC', 'Van One') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap();

    let (route_id,): (i64,) =
        sqlx::query_as("INSERT INTO routes (definition_id, vehicle_id, route_date) VALUES ($1, $2, $3) RETURNING id")
            .bind(definition_id)
            .bind(vehicle_id)
            .bind(Utc::now().date_naive())
            .fetch_one(pool)
            .await
            .unwrap();

    let mut stop_ids = Vec::new();
    for sequence in [3, 1, 2] {
        let (stop_id,): (i64,) =
            sqlx::query_as("INSERT INTO stops (route_id, site_id, sequence) VALUES ($1, $2, $3) RETURNING id")
                .bind(route_id)
                .bind(site_id)
                .bind(sequence)
                .fetch_one(pool)
                .await
                .unwrap();
        stop_ids.push(stop_id);
    }

    Fixture {
        definition_id,
        vehicle_id,
        site_id,
        route_id,
        stop_ids,
    }
}

async fn staff_user(pool: &PgPool, state: &AppState) -> (i64, String) {
    let (user_id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (username, password_hash, is_staff) VALUES ('manager', 'unused', TRUE) RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    let (token, _) = generate_token(user_id, "manager", true, &state.jwt).unwrap();
    (user_id, token)
}

async fn staff_token(pool: &PgPool, state: &AppState) -> String {
    staff_user(pool, state).await.1
}

/// POST a raw body with no content type
async fn post_raw(app: &Router, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn route_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM routes").fetch_one(pool).await.unwrap();
    count
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn today_stops_are_ordered_by_sequence(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let app = create_app(state(pool));

    let uri = format!("/api/stops/?vehicle_id={}", fixture.vehicle_id);
    let (status, body) = call(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let sequences: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|stop| stop["sequence"].as_i64().unwrap())
        .collect();
    assert_eq!(sequences, vec![1, 2, 3]);
    assert_eq!(body[0]["site"]["customer"]["name"], "The Chip Shop");
    assert_eq!(body[0]["status"], "PENDING");
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn vehicle_without_a_route_today_gets_404(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    sqlx::query("UPDATE routes SET route_date = $1 WHERE id = $2")
        .bind(Utc::now().date_naive() - Duration::days(1))
        .bind(fixture.route_id)
        .execute(&pool)
        .await
        .unwrap();
    let app = create_app(state(pool));

    let uri = format!("/api/today-stops/?vehicle_id={}", fixture.vehicle_id);
    let (status, body) = call(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No route found for this vehicle today.");
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn second_submission_for_a_stop_is_rejected(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let app = create_app(state(pool.clone()));
    let stop_id = fixture.stop_ids[0];
    let payload = json!({ "waste_oil_quantity": "125.50", "payment_made": 20, "docket_number": "D-1001" });

    let uri = format!("/api/stops/{}/collection/", stop_id);
    let (status, body) = call(&app, Method::POST, &uri, None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Collection submitted successfully.");

    let (status, stop) = call(&app, Method::GET, &format!("/api/stops/{}/", stop_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stop["status"], "COMPLETED");

    let uri = format!("/api/stops/{}/submit-collection/", stop_id);
    let (status, body) = call(&app, Method::POST, &uri, None, Some(payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Pending stop not found or already completed.");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM collections WHERE stop_id = $1")
        .bind(stop_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn invalid_payload_leaves_the_stop_pending(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let app = create_app(state(pool));
    let stop_id = fixture.stop_ids[1];

    let uri = format!("/api/stops/{}/collection/", stop_id);
    let payload = json!({ "waste_oil_quantity": "12.345", "fresh_oil_container_qty": -1 });
    let (status, body) = call(&app, Method::POST, &uri, None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["waste_oil_quantity"].is_array());
    assert!(body["details"]["fresh_oil_container_qty"].is_array());

    let (_, stop) = call(&app, Method::GET, &format!("/api/stops/{}/", stop_id), None, None).await;
    assert_eq!(stop["status"], "PENDING");
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn failed_stop_cannot_take_a_collection(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let app = create_app(state(pool));
    let stop_id = fixture.stop_ids[2];

    let uri = format!("/api/stops/{}/failure/", stop_id);
    let (status, body) = call(&app, Method::POST, &uri, None, Some(json!({ "failure_reason": "SHOP_CLOSED" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "FAILED");
    assert_eq!(body["failure_reason"], "SHOP_CLOSED");

    let uri = format!("/api/stops/{}/collection/", stop_id);
    let (status, _) = call(&app, Method::POST, &uri, None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn reorder_renumbers_the_route(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let state = state(pool.clone());
    let token = staff_token(&pool, &state).await;
    let app = create_app(state);

    let order: Vec<i64> = fixture.stop_ids.iter().rev().copied().collect();
    let uri = format!("/api/admin/routes/{}/stops/order", fixture.route_id);
    let (status, body) = call(&app, Method::PUT, &uri, Some(&token), Some(json!({ "stop_ids": order }))).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, order);
    assert_eq!(body[0]["sequence"], 1);

    let (status, _) = call(&app, Method::PUT, &uri, Some(&token), Some(json!({ "stop_ids": [order[0]] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn daily_log_reports_totals_and_is_unique(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let state = state(pool.clone());
    let token = staff_token(&pool, &state).await;
    let app = create_app(state);

    let uri = format!("/api/admin/routes/{}/log", fixture.route_id);
    let payload = json!({
        "start_day_waste_oil": "100.00",
        "end_day_waste_oil": "850.50",
        "start_day_fresh_oil": "400",
        "end_day_fresh_oil": "150"
    });
    let (status, body) = call(&app, Method::POST, &uri, Some(&token), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["waste_oil_collected"], "750.50");
    assert_eq!(body["fresh_oil_delivered"], "250.00");

    let (status, _) = call(&app, Method::POST, &uri, Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn drivers_cannot_use_the_planner_api(pool: PgPool) {
    let (user_id,): (i64,) =
        sqlx::query_as("INSERT INTO users (username, password_hash) VALUES ('driver', 'unused') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    let state = state(pool);
    let (token, _) = generate_token(user_id, "driver", false, &state.jwt).unwrap();
    let app = create_app(state);

    let (status, _) = call(&app, Method::GET, "/api/admin/customers", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "driver");
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn missing_stop_is_404_whatever_the_body(pool: PgPool) {
    let app = create_app(state(pool));

    for body in ["{not json", "", "[1, 2]"] {
        let (status, response) = post_raw(&app, "/api/stops/999999/collection/", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "body {:?}", body);
        assert_eq!(response["message"], "Pending stop not found or already completed.");
    }

    let (status, response) = post_raw(&app, "/api/stops/999999/failure/", "{not json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["code"], "NOT_FOUND");
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn pending_stop_reads_raw_bodies(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let app = create_app(state(pool));

    let uri = format!("/api/stops/{}/collection/", fixture.stop_ids[0]);
    let (status, body) = post_raw(&app, &uri, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["non_field_errors"].is_array());

    let (status, body) = post_raw(&app, &uri, "").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["stop_id"], fixture.stop_ids[0]);

    let uri = format!("/api/stops/{}/failure/", fixture.stop_ids[1]);
    let (status, body) = post_raw(&app, &uri, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn inactive_definition_cannot_take_a_new_route(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let (retired_id,): (i64,) =
        sqlx::query_as("INSERT INTO route_definitions (name, is_active) VALUES ('Old Valleys', FALSE) RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    let state = state(pool.clone());
    let token = staff_token(&pool, &state).await;
    let app = create_app(state);

    let tomorrow = Utc::now().date_naive() + Duration::days(1);
    let payload = json!({ "definition_id": retired_id, "vehicle_id": fixture.vehicle_id, "route_date": tomorrow });
    let (status, body) = call(&app, Method::POST, "/api/admin/routes", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["definition_id"][0]["code"], "inactive");
    assert_eq!(route_count(&pool).await, 1);
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn planned_route_numbers_inline_stops_and_is_unique_per_day(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let state = state(pool.clone());
    let (manager_id, token) = staff_user(&pool, &state).await;
    let app = create_app(state);

    let tomorrow = Utc::now().date_naive() + Duration::days(1);
    let payload = json!({
        "definition_id": fixture.definition_id,
        "vehicle_id": fixture.vehicle_id,
        "route_date": tomorrow,
        "driver_ids": [manager_id],
        "stops": [
            { "site_id": fixture.site_id },
            { "site_id": fixture.site_id, "is_priority": true },
            { "site_id": fixture.site_id, "sequence": 7 }
        ]
    });
    let (status, body) = call(&app, Method::POST, "/api/admin/routes", Some(&token), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["stop_count"], 3);
    assert_eq!(body["drivers"][0]["id"], manager_id);

    let sequences: Vec<i64> = body["stops"]
        .as_array()
        .unwrap()
        .iter()
        .map(|stop| stop["sequence"].as_i64().unwrap())
        .collect();
    assert_eq!(sequences, vec![1, 2, 7]);
    assert_eq!(body["stops"][1]["is_priority"], true);

    let (status, body) = call(&app, Method::POST, "/api/admin/routes", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(route_count(&pool).await, 2);
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn route_drivers_must_be_distinct_active_users(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let state = state(pool.clone());
    let (manager_id, token) = staff_user(&pool, &state).await;
    let app = create_app(state);

    let tomorrow = Utc::now().date_naive() + Duration::days(1);
    for driver_ids in [json!([999_999]), json!([manager_id, manager_id])] {
        let payload = json!({
            "definition_id": fixture.definition_id,
            "vehicle_id": fixture.vehicle_id,
            "route_date": tomorrow,
            "driver_ids": driver_ids
        });
        let (status, body) = call(&app, Method::POST, "/api/admin/routes", Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["driver_ids"].is_array());
    }
    assert_eq!(route_count(&pool).await, 1);
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn added_stop_goes_after_the_last_one(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let state = state(pool.clone());
    let token = staff_token(&pool, &state).await;
    let app = create_app(state);

    let uri = format!("/api/admin/routes/{}/stops", fixture.route_id);
    let (status, body) = call(&app, Method::POST, &uri, Some(&token), Some(json!({ "site_id": fixture.site_id }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sequence"], 4);
    assert_eq!(body["status"], "PENDING");
}

#[sqlx::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn route_with_a_daily_log_cannot_be_deleted(pool: PgPool) {
    let fixture = seed_today(&pool).await;
    let state = state(pool.clone());
    let token = staff_token(&pool, &state).await;
    let app = create_app(state);

    let log_uri = format!("/api/admin/routes/{}/log", fixture.route_id);
    let (status, _) = call(&app, Method::POST, &log_uri, Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/admin/routes/{}", fixture.route_id);
    let (status, _) = call(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(route_count(&pool).await, 1);

    sqlx::query("DELETE FROM daily_vehicle_logs WHERE route_id = $1")
        .bind(fixture.route_id)
        .execute(&pool)
        .await
        .unwrap();
    let (status, _) = call(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(route_count(&pool).await, 0);
}
