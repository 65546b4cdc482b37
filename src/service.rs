//! Wires the todo API, health checks, dashboard placeholder and access gate into one [`App`].

use std::sync::Arc;

use crate::config::Config;
use crate::middleware::{AccessGate, Authenticator};
use crate::todos::{self, TodoStore};
use crate::{App, Request, Router, health};

/// Builds the service around `store`, gating `config.protected_prefix` with
/// `auth`.
pub fn app(config: &Config, store: Arc<TodoStore>, auth: impl Authenticator) -> App {
    let router = Router::new()
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
        .get("/dashboard", dashboard)
        .get("/dashboard/{*page}", dashboard);

    App::new(todos::routes(router, &store))
        .layer(AccessGate::new(&*config.protected_prefix, &*config.login_path, auth))
}

/// Stands in for the dashboard pages, which are not rendered here, so an
/// authenticated request under the gate has something to reach.
async fn dashboard(_req: Request) -> &'static str {
    "dashboard"
}
