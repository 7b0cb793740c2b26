//! Student endpoint tests.

use std::sync::Arc;
use std::time::Duration;

use hyper::Method;
use serde_json::json;
use students_core::config::HttpServerConfig;
use students_core::{MemoryStore, SqliteStore, StudentStore};
use tempfile::tempdir;

use super::helpers::{
    memory_router, router_with, router_with_config, send, BrokenStore, CountingStore, SlowStore,
};

const ADA: &str = r#"{"name":"Ada","email":"ada@example.com","age":30}"#;

#[tokio::test]
async fn test_create_then_get_scenario() {
    let router = memory_router();

    let (status, body) = send(&router, Method::POST, "/students", ADA).await;
    assert_eq!(status, 201);
    assert_eq!(body["status"], "OK");
    let id = body["id"].as_i64().unwrap();
    assert!(id > 0);

    let (status, body) = send(&router, Method::GET, &format!("/students/{}", id), "").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"id": id, "name": "Ada", "email": "ada@example.com", "age": 30})
    );
}

#[tokio::test]
async fn test_create_then_get_on_sqlite() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let store = SqliteStore::open(temp_dir.path().join("students.db"))?;
    let router = router_with(Arc::new(store));

    let (status, body) = send(&router, Method::POST, "/students", ADA).await;
    assert_eq!(status, 201);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(&router, Method::GET, &format!("/students/{}", id), "").await;
    assert_eq!(status, 200);
    assert_eq!(body["email"], "ada@example.com");
    Ok(())
}

#[tokio::test]
async fn test_round_trip_for_several_inputs() {
    let router = memory_router();
    let inputs = [
        ("Grace", "grace@navy.mil", 85),
        ("Linus", "linus+kernel@example.org", 0),
        ("Émilie", "emilie@sub.example.fr", 42),
    ];

    for (name, email, age) in inputs {
        let payload = json!({"name": name, "email": email, "age": age}).to_string();
        let (status, created) = send(&router, Method::POST, "/students", &payload).await;
        assert_eq!(status, 201);
        let id = created["id"].as_i64().unwrap();

        let (_, fetched) = send(&router, Method::GET, &format!("/students/{}", id), "").await;
        assert_eq!(
            fetched,
            json!({"id": id, "name": name, "email": email, "age": age})
        );
    }
}

#[tokio::test]
async fn test_empty_body_rejected() {
    let router = memory_router();
    for body in ["", "  \n"] {
        let (status, response) = send(&router, Method::POST, "/students", body).await;
        assert_eq!(status, 400);
        assert_eq!(response["status"], "Error");
        assert_eq!(response["error"], "empty body not allowed");
    }
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let router = memory_router();
    let (status, response) = send(&router, Method::POST, "/students", "{\"name\": ").await;
    assert_eq!(status, 400);
    assert_eq!(response["status"], "Error");
    assert_ne!(response["error"], "empty body not allowed");

    let (status, _) = send(
        &router,
        Method::POST,
        "/students",
        r#"{"name":"Ada","email":"ada@example.com","age":"thirty"}"#,
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_invalid_email_never_reaches_store() {
    let store = Arc::new(CountingStore::new(MemoryStore::new()));
    let router = router_with(store.clone());

    let (status, response) = send(
        &router,
        Method::POST,
        "/students",
        r#"{"name":"Ada","email":"not-an-email","age":30}"#,
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(response["error"], "validation failed");
    assert_eq!(
        response["fields"]["email"],
        "field email must be a valid email address"
    );
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_missing_fields_reported_per_field() {
    let store = Arc::new(CountingStore::new(MemoryStore::new()));
    let router = router_with(store.clone());

    let (status, response) = send(&router, Method::POST, "/students", r#"{"age":3}"#).await;
    assert_eq!(status, 400);
    assert_eq!(
        response["fields"],
        json!({
            "name": "field name is a required field",
            "email": "field email is a required field"
        })
    );
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let router = memory_router();
    let (status, response) = send(&router, Method::GET, "/students/404", "").await;
    assert_eq!(status, 404);
    assert_eq!(response["error"], "student not found with id 404");
}

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let store = Arc::new(CountingStore::new(MemoryStore::new()));
    let router = router_with(store.clone());

    let (status, response) = send(&router, Method::GET, "/students/abc", "").await;
    assert_eq!(status, 400);
    assert_eq!(response["error"], "invalid id format");
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_list_empty_and_populated() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with(store.clone());

    let (status, body) = send(&router, Method::GET, "/students", "").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    store.create_student("A", "a@example.com", 1).unwrap();
    store.create_student("B", "b@example.com", 2).unwrap();

    let (status, body) = send(&router, Method::GET, "/students", "").await;
    assert_eq!(status, 200);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["A", "B"]);
}

#[tokio::test]
async fn test_store_failures_map_to_500() {
    let router = router_with(Arc::new(BrokenStore));

    let (status, body) = send(&router, Method::POST, "/students", ADA).await;
    assert_eq!(status, 500);
    assert_eq!(body["status"], "Error");
    assert!(body["error"].as_str().unwrap().contains("connection refused"));

    let (status, _) = send(&router, Method::GET, "/students", "").await;
    assert_eq!(status, 500);

    let (status, _) = send(&router, Method::GET, "/students/1", "").await;
    assert_eq!(status, 500);
}

fn short_timeout() -> HttpServerConfig {
    HttpServerConfig {
        response_timeout_ms: 10,
        ..HttpServerConfig::default()
    }
}

#[tokio::test]
async fn test_slow_create_completes_and_persists() {
    let store = Arc::new(SlowStore::new(MemoryStore::new(), Duration::from_millis(100)));
    let router = router_with_config(store.clone(), short_timeout());

    let (status, body) = send(&router, Method::POST, "/students", ADA).await;
    assert_eq!(status, 201);
    assert_eq!(body["status"], "OK");

    // The reported id is the row that was written, and nothing else was.
    let students = store.inner().get_all_students().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].id, body["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_slow_reads_time_out_as_500() {
    let store = Arc::new(SlowStore::new(MemoryStore::new(), Duration::from_millis(100)));
    store.inner().create_student("Ada", "ada@example.com", 30).unwrap();
    let router = router_with_config(store, short_timeout());

    for path in ["/students", "/students/1"] {
        let (status, body) = send(&router, Method::GET, path, "").await;
        assert_eq!(status, 500, "path {}", path);
        assert_eq!(body["status"], "Error");
        assert!(body["error"].as_str().unwrap().contains("timed out"));
    }
}

#[tokio::test]
async fn test_whitespace_name_is_accepted() {
    let router = memory_router();
    let payload = r#"{"name":"   ","email":"ada@example.com","age":30}"#;

    let (status, body) = send(&router, Method::POST, "/students", payload).await;
    assert_eq!(status, 201);

    let (_, record) = send(&router, Method::GET, &format!("/students/{}", body["id"]), "").await;
    assert_eq!(record["name"], "   ");
}
