//! # trellis
//!
//! An in-memory todo service on a minimal HTTP layer.
//!
//! ## The service
//!
//! - `GET /api/todos[?query=q]`, `POST /api/todos`
//! - `GET | PATCH | DELETE /api/todos/{todoId}`, where `todoId` is a 1-based
//!   position in the store
//! - `GET /healthz`, `GET /readyz`
//! - an access gate that redirects `/dashboard*` to `/login` unless the
//!   request is authenticated
//!
//! The store starts with five sample todos and is lost on restart.
//!
//! ## The HTTP layer
//!
//! - Radix-tree routing, one tree per method, via [`matchit`]
//! - hyper 1 on tokio, HTTP/1.1 and HTTP/2
//! - Pre-routing [`middleware`]
//! - Graceful shutdown on SIGTERM / Ctrl-C, draining in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trellis::{Config, Server, middleware::AuthFlag, service, todos::TodoStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trellis::Error> {
//!     let config = Config::default();
//!     let app = service::app(&config, Arc::new(TodoStore::seeded()), AuthFlag::new(true));
//!     Server::bind(&config.addr)?.serve(app).await
//! }
//! ```

mod app;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod config;
pub mod health;
pub mod middleware;
pub mod service;
pub mod todos;

pub use app::App;
pub use config::Config;
pub use error::Error;
pub use handler::{Handler, WithState, with_state};
pub use request::{JsonRejection, Request};
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
