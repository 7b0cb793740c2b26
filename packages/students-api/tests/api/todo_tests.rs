//! Todo endpoint tests.

use hyper::Method;
use serde_json::json;

use super::helpers::{memory_router, send};

#[tokio::test]
async fn test_list_seeded_todos() {
    let router = memory_router();
    let (status, body) = send(&router, Method::GET, "/todos", "").await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0], json!({"id": "1", "task": "Learn Go", "completed": true}));
    assert_eq!(body[1], json!({"id": "2", "task": "Build a REST API", "completed": false}));
}

#[tokio::test]
async fn test_get_and_missing_todo() {
    let router = memory_router();

    let (status, body) = send(&router, Method::GET, "/todos/3", "").await;
    assert_eq!(status, 200);
    assert_eq!(body["task"], "Test the API");

    let (status, body) = send(&router, Method::GET, "/todos/99", "").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "todo not found");
}

#[tokio::test]
async fn test_toggle_todo() {
    let router = memory_router();

    let (status, body) = send(&router, Method::PATCH, "/todos/2", "").await;
    assert_eq!(status, 200);
    assert_eq!(body["completed"], true);

    let (_, body) = send(&router, Method::GET, "/todos/2", "").await;
    assert_eq!(body["completed"], true);

    let (status, body) = send(&router, Method::PATCH, "/todos/nope", "").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "todo not found");
}

#[tokio::test]
async fn test_add_todo() {
    let router = memory_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/todos",
        r#"{"id":"4","task":"Write docs","completed":false}"#,
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body, json!({"id": "4", "task": "Write docs", "completed": false}));

    let (_, body) = send(&router, Method::GET, "/todos", "").await;
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (status, body) = send(&router, Method::POST, "/todos", "").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "empty body not allowed");

    let (status, _) = send(&router, Method::POST, "/todos", "[1,2").await;
    assert_eq!(status, 400);
}
