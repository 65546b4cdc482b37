//! Request handlers for `/api/todos` and `/api/todos/{todoId}`.

use std::sync::Arc;

use http::StatusCode;
use tracing::info;

use super::model::{Todo, TodoFields};
use super::store::TodoStore;
use crate::request::JsonRejection;
use crate::response::{IntoResponse, Json, Response};
use crate::Request;

type Created<T> = (StatusCode, Json<T>);

/// Why a todo request could not be served.
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("todo not found")]
    NotFound,

    #[error(transparent)]
    Body(#[from] JsonRejection),
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => Response::error(StatusCode::NOT_FOUND, &self.to_string()),
            Self::Body(rejection) => rejection.into_response(),
        }
    }
}

/// `GET /api/todos[?query=q]`
pub async fn list(store: Arc<TodoStore>, req: Request) -> Json<Vec<Todo>> {
    Json(store.list(req.query("query")))
}

/// `POST /api/todos` → 201
pub async fn create(store: Arc<TodoStore>, req: Request) -> Result<Created<Todo>, TodoError> {
    let fields = req.json::<Option<TodoFields>>()?.unwrap_or_default();
    let todo = store.create(fields);
    info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `GET /api/todos/{todoId}`
pub async fn get(store: Arc<TodoStore>, req: Request) -> Result<Json<Todo>, TodoError> {
    let position = position(&req)?;
    store.get(position).map(Json).ok_or(TodoError::NotFound)
}

/// `PATCH /api/todos/{todoId}` → 201
///
/// Title, description and completed are all overwritten; the ones the body
/// leaves out are cleared. A `null` body clears all three. A missing todo is
/// reported before the body is read.
pub async fn update(store: Arc<TodoStore>, req: Request) -> Result<Created<Todo>, TodoError> {
    let position = position(&req)?;
    if !(1..=store.len()).contains(&position) {
        return Err(TodoError::NotFound);
    }
    let fields = req.json::<Option<TodoFields>>()?.unwrap_or_default();
    let todo = store.replace_fields(position, fields).ok_or(TodoError::NotFound)?;
    info!(position, id = todo.id, "todo updated");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `DELETE /api/todos/{todoId}`
pub async fn delete(store: Arc<TodoStore>, req: Request) -> Result<Json<Todo>, TodoError> {
    let position = position(&req)?;
    let todo = store.remove(position).ok_or(TodoError::NotFound)?;
    info!(position, id = todo.id, "todo deleted");
    Ok(Json(todo))
}

/// The 1-based position in `{todoId}`. Anything that is not a non-negative
/// integer addresses nothing.
fn position(req: &Request) -> Result<usize, TodoError> {
    req.param("todoId")
        .and_then(|raw| raw.parse().ok())
        .ok_or(TodoError::NotFound)
}
