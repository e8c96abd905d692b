// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests driving requests through `tower::ServiceExt::oneshot`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use tower::ServiceExt;

use herald_gateway::{GatewayState, router};
use herald_storage::SqliteProvider;
use herald_test_utils::{
    Failure, MockConnectionProvider, TEST_ADMIN_KEY, TEST_PASSWORD, TestDatabase, message,
};

const ADMIN_KEY: &str = "admin-secret";
const DB_PASSWORD: &str = "p@ss-w0rd";
const ORIGIN: &str = "https://app.example.com";

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn complete_vars() -> HashMap<String, String> {
    vars(&[
        ("DB_SERVER", "/srv/data"),
        ("DB_NAME", "messages"),
        ("DB_USER", "app"),
        ("DB_PASSWORD", DB_PASSWORD),
        ("ADMIN_API_KEY", ADMIN_KEY),
    ])
}

fn app(provider: MockConnectionProvider, vars: HashMap<String, String>) -> Router {
    router(GatewayState::new(Arc::new(provider), Arc::new(vars)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ---- /getdata ----

#[tokio::test]
async fn getdata_reports_every_missing_setting_without_connecting() {
    let provider = MockConnectionProvider::new();
    let counts = provider.counts();

    let response = app(provider, HashMap::new())
        .oneshot(get("/getdata"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "DB connection settings missing: DB_SERVER, DB_NAME, DB_USER, DB_PASSWORD"
    );
    assert_eq!(counts.acquired(), 0);
}

#[tokio::test]
async fn getdata_returns_rows_as_json_in_store_order() {
    let provider = MockConnectionProvider::new().with_messages(vec![
        message(2, "newer", "2024-03-01 00:00:00"),
        message(1, "older", "2024-01-01 00:00:00"),
    ]);
    let counts = provider.counts();

    let request = Request::builder()
        .uri("/getdata")
        .header(header::ORIGIN, ORIGIN)
        .body(Body::empty())
        .unwrap();
    let response = app(provider, complete_vars()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        ORIGIN
    );

    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!([
            {"id": 2, "message": "newer", "created_at": "2024-03-01T00:00:00"},
            {"id": 1, "message": "older", "created_at": "2024-01-01T00:00:00"},
        ])
    );
    assert_eq!(counts.acquired(), 1);
    assert_eq!(counts.closed(), 1);
}

#[tokio::test]
async fn getdata_empty_table_is_an_empty_array() {
    let response = app(MockConnectionProvider::new(), complete_vars())
        .oneshot(get("/getdata"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "[]");
}

#[tokio::test]
async fn getdata_read_failure_is_redacted_and_releases() {
    let provider = MockConnectionProvider::new().with_failure(Failure::Read(format!(
        "no such table: messages_table (PWD={DB_PASSWORD})"
    )));
    let counts = provider.counts();

    let response = app(provider, complete_vars())
        .oneshot(get("/getdata"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.starts_with("Error: "), "body: {body}");
    assert!(body.contains("no such table"));
    assert!(!body.contains(DB_PASSWORD));
    assert_eq!(counts.closed(), 1);
}

#[tokio::test]
async fn getdata_connect_failure_is_500() {
    let provider =
        MockConnectionProvider::new().with_failure(Failure::Connect("host unreachable".into()));

    let response = app(provider, complete_vars())
        .oneshot(get("/getdata"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("host unreachable"));
}

#[tokio::test]
async fn getdata_preflight_is_204_with_cors_headers() {
    let provider = MockConnectionProvider::new();
    let counts = provider.counts();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/getdata")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    // Preflight must succeed even with no database settings at all.
    let response = app(provider, HashMap::new()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ORIGIN
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "GET, OPTIONS"
    );
    assert!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("x-functions-key")
    );
    assert_eq!(counts.acquired(), 0);
}

// ---- /init-db ----

#[tokio::test]
async fn init_db_without_key_is_unauthorized() {
    let provider = MockConnectionProvider::new();
    let counts = provider.counts();

    let response = app(provider, complete_vars())
        .oneshot(get("/init-db"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(response).await, "Unauthorized");
    assert_eq!(counts.acquired(), 0);
}

#[tokio::test]
async fn init_db_wrong_or_empty_key_is_unauthorized() {
    for uri in ["/init-db?key=wrong", "/init-db?key=", "/init-db?key=ADMIN-SECRET"] {
        let provider = MockConnectionProvider::new();
        let counts = provider.counts();
        let response = app(provider, complete_vars())
            .oneshot(get(uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(counts.acquired(), 0, "{uri}");
    }
}

#[tokio::test]
async fn init_db_duplicate_key_is_unauthorized() {
    for uri in [
        format!("/init-db?key=wrong&key={ADMIN_KEY}"),
        format!("/init-db?key={ADMIN_KEY}&key={ADMIN_KEY}"),
    ] {
        let provider = MockConnectionProvider::new();
        let counts = provider.counts();
        let response = app(provider, complete_vars())
            .oneshot(get(&uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body_text(response).await, "Unauthorized");
        assert_eq!(counts.acquired(), 0, "{uri}");
    }
}

#[tokio::test]
async fn init_db_unset_admin_key_rejects_everything() {
    let mut env = complete_vars();
    env.remove("ADMIN_API_KEY");

    let response = app(MockConnectionProvider::new(), env)
        .oneshot(get("/init-db?key=anything"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn init_db_checks_key_before_config() {
    // No DB settings: an unauthorized caller still only sees 401.
    let response = app(
        MockConnectionProvider::new(),
        vars(&[("ADMIN_API_KEY", ADMIN_KEY)]),
    )
    .oneshot(get("/init-db?key=nope"))
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app(
        MockConnectionProvider::new(),
        vars(&[("ADMIN_API_KEY", ADMIN_KEY), ("DB_SERVER", "/srv")]),
    )
    .oneshot(get(&format!("/init-db?key={ADMIN_KEY}")))
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "DB connection settings missing: DB_NAME, DB_USER, DB_PASSWORD"
    );
}

#[tokio::test]
async fn init_db_with_correct_key_initializes_once() {
    let provider = MockConnectionProvider::new();
    let counts = provider.counts();

    let response = app(provider, complete_vars())
        .oneshot(get(&format!("/init-db?key={ADMIN_KEY}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Database initialized successfully");
    assert_eq!(counts.acquired(), 1);
    assert_eq!(counts.initialized(), 1);
    assert_eq!(counts.closed(), 1);
}

#[tokio::test]
async fn init_db_accepts_post() {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/init-db?key={ADMIN_KEY}"))
        .body(Body::empty())
        .unwrap();

    let response = app(MockConnectionProvider::new(), complete_vars())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn init_db_schema_failure_hides_secrets() {
    let provider = MockConnectionProvider::new().with_failure(Failure::SchemaInit(format!(
        "permission denied for key {ADMIN_KEY} and {DB_PASSWORD}"
    )));
    let counts = provider.counts();

    let response = app(provider, complete_vars())
        .oneshot(get(&format!("/init-db?key={ADMIN_KEY}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.starts_with("Error: "), "body: {body}");
    assert!(!body.contains(ADMIN_KEY));
    assert!(!body.contains(DB_PASSWORD));
    assert_eq!(counts.closed(), 1);
}

// ---- /db-status and /health ----

#[tokio::test]
async fn db_status_reports_success() {
    let provider = MockConnectionProvider::new();
    let counts = provider.counts();

    let response = app(provider, complete_vars())
        .oneshot(get("/db-status"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"status": "DB connected successfully"})
    );
    assert_eq!(counts.pinged(), 1);
    assert_eq!(counts.closed(), 1);
}

#[tokio::test]
async fn db_status_reports_failure_with_detail() {
    let response = app(MockConnectionProvider::new(), HashMap::new())
        .oneshot(get("/db-status"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["status"], "DB connection failed");
    assert!(body["error"].as_str().unwrap().contains("DB_SERVER"));
}

#[tokio::test]
async fn health_is_ok() {
    let response = app(MockConnectionProvider::new(), HashMap::new())
        .oneshot(get("/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

// ---- against a real encrypted database ----

#[tokio::test]
async fn init_then_read_returns_both_seeds() {
    let db = TestDatabase::new().unwrap();
    let state = GatewayState::new(Arc::new(SqliteProvider::new()), Arc::new(db.vars()));

    // Reading before initialization fails without creating the database.
    let response = router(state.clone())
        .oneshot(get("/getdata"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!db.path().exists());

    for _ in 0..2 {
        let response = router(state.clone())
            .oneshot(get(&format!("/init-db?key={TEST_ADMIN_KEY}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(db.count().unwrap(), 2);

    db.insert_at("newest", "2099-12-31 23:59:59").unwrap();

    let response = router(state).oneshot(get("/getdata")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["message"], "newest");
    assert_eq!(rows[0]["created_at"], "2099-12-31T23:59:59");

    let texts: Vec<&str> = rows.iter().filter_map(|r| r["message"].as_str()).collect();
    assert!(texts.contains(&"Hello from Azure SQL Database!"));
    assert!(texts.contains(&"This data is served by Azure Function!"));
    assert!(!body.to_string().contains(TEST_PASSWORD));
}
