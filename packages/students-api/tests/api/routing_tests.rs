//! Routing and method dispatch tests.

use hyper::Method;

use super::helpers::{memory_router, send};

#[tokio::test]
async fn test_unknown_path_is_404() {
    let router = memory_router();
    let (status, body) = send(&router, Method::GET, "/teachers", "").await;
    assert_eq!(status, 404);
    assert_eq!(body["status"], "Error");
    assert_eq!(body["error"], "no route found for /teachers");
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let router = memory_router();

    for (method, path) in [
        (Method::DELETE, "/students/1"),
        (Method::PUT, "/students/1"),
        (Method::POST, "/students/1"),
        (Method::PATCH, "/students/1"),
        (Method::DELETE, "/todos/1"),
        (Method::PATCH, "/todos"),
    ] {
        let (status, body) = send(&router, method.clone(), path, "").await;
        assert_eq!(status, 405, "{} {}", method, path);
        assert_eq!(body["error"], "method not allowed");
    }
}
