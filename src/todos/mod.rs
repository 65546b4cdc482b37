//! The todo API.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/todos[?query=q]` | 200 |
//! | POST | `/api/todos` | 201 |
//! | GET | `/api/todos/{todoId}` | 200 |
//! | PATCH | `/api/todos/{todoId}` | 201 |
//! | DELETE | `/api/todos/{todoId}` | 200 |
//!
//! `todoId` is a 1-based position in the store. Positions past the end give
//! `404`; bodies that are not JSON give `400`.

mod handlers;
mod model;
mod store;

use std::sync::Arc;

pub use handlers::TodoError;
pub use model::{Todo, TodoFields};
pub use store::TodoStore;

use crate::{Router, with_state};

/// Registers the todo routes on `router`, all sharing `store`.
pub fn routes(router: Router, store: &Arc<TodoStore>) -> Router {
    router
        .get("/api/todos", with_state(Arc::clone(store), handlers::list))
        .post("/api/todos", with_state(Arc::clone(store), handlers::create))
        .get("/api/todos/{todoId}", with_state(Arc::clone(store), handlers::get))
        .patch("/api/todos/{todoId}", with_state(Arc::clone(store), handlers::update))
        .delete("/api/todos/{todoId}", with_state(Arc::clone(store), handlers::delete))
}
