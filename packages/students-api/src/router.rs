//! Matchit routing configuration.

use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use matchit::Router as MatchitRouter;
use students_core::config::HttpServerConfig;
use students_core::validation::FieldViolation;
use students_core::{StudentStore, TodoStore};

use crate::handlers;
use crate::handlers::response::{error_response, validation_error_response};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Student record store
    pub students: Arc<dyn StudentStore>,
    /// Todo store
    pub todos: Arc<dyn TodoStore>,
    /// Listener settings (timeouts)
    pub config: Arc<HttpServerConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the student and todo routes.
    pub fn new(
        students: Arc<dyn StudentStore>,
        todos: Arc<dyn TodoStore>,
        config: Arc<HttpServerConfig>,
    ) -> Self {
        let mut router = MatchitRouter::new();

        router
            .insert("/students", RouteHandler::Student)
            .expect("Failed to insert /students route");
        router
            .insert("/students/{id}", RouteHandler::Student)
            .expect("Failed to insert /students/{id} route");

        router
            .insert("/todos", RouteHandler::Todo)
            .expect("Failed to insert /todos route");
        router
            .insert("/todos/{id}", RouteHandler::Todo)
            .expect("Failed to insert /todos/{id} route");

        Self {
            inner: router,
            state: AppState {
                students,
                todos,
                config,
            },
        }
    }

    /// Routes an incoming request and always produces a response.
    ///
    /// Handler errors are converted into the JSON error envelope here.
    pub async fn route<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let path = req.uri().path().to_string();
        let method = req.method().clone();
        tracing::debug!("{} {}", method, path);

        let result = match self.inner.at(&path) {
            Ok(matched) => {
                matched
                    .value
                    .handle(req, matched.params, self.state.clone())
                    .await
            }
            Err(_) => Err(RouterError::NotFound(format!("no route found for {}", path))),
        };

        match result {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    RouterError::InternalError(_) | RouterError::Timeout => {
                        tracing::error!("{} {} failed: {}", method, path, err)
                    }
                    _ => tracing::debug!("{} {} rejected: {}", method, path, err),
                }
                err.into()
            }
        }
    }
}

/// Route handler function.
enum RouteHandler {
    Student,
    Todo,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle<B>(
        &self,
        req: Request<B>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let id = params.get("id");
        let method = req.method().clone();
        match self {
            RouteHandler::Student => match id {
                None if method == Method::POST => handlers::create_student(req, state).await,
                None if method == Method::GET => handlers::list_students(state).await,
                Some(id) if method == Method::GET => handlers::get_student(id, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            RouteHandler::Todo => match id {
                None if method == Method::POST => handlers::add_todo(req, state).await,
                None if method == Method::GET => handlers::list_todos(state).await,
                Some(id) if method == Method::GET => handlers::get_todo(id, state).await,
                Some(id) if method == Method::PATCH => handlers::toggle_todo(id, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    Validation(Vec<FieldViolation>),
    NotFound(String),
}

impl RouterError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            RouterError::MethodNotAllowed => 405,
            RouterError::InternalError(_) => 500,
            RouterError::Timeout => 408,
            RouterError::BadRequest(_) | RouterError::Validation(_) => 400,
            RouterError::NotFound(_) => 404,
        }
    }
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "method not allowed"),
            RouterError::InternalError(msg) => write!(f, "{}", msg),
            RouterError::Timeout => write!(f, "request timeout"),
            RouterError::BadRequest(msg) => write!(f, "{}", msg),
            RouterError::Validation(violations) => {
                write!(f, "validation failed for {} field(s)", violations.len())
            }
            RouterError::NotFound(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let status = err.status();
        let error_body = match &err {
            RouterError::Validation(violations) => validation_error_response(violations),
            other => error_response(other.to_string()),
        };

        let body = serde_json::to_vec(&error_body).unwrap_or_else(|e| {
            format!(
                "{{\"status\":\"Error\",\"error\":\"failed to serialize error: {}\"}}",
                e
            )
            .into_bytes()
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Bytes::from_static(b"Internal Server Error"));
                *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}
