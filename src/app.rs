//! Middleware chain in front of a router.

use std::time::Instant;

use http::StatusCode;
use http::header::ALLOW;
use tracing::debug;

use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;
use crate::router::{Lookup, Router};

/// A routable application: middleware runs first, then the router.
///
/// [`App::handle`] is the whole request path minus the socket, so tests can
/// drive an app directly.
pub struct App {
    router: Router,
    middleware: Vec<Box<dyn Middleware>>,
}

impl App {
    pub fn new(router: Router) -> Self {
        Self { router, middleware: Vec::new() }
    }

    /// Appends a middleware. Middleware runs in the order it was added.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Routes one request and produces one response.
    pub async fn handle(&self, mut req: Request) -> Response {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_owned();

        let response = match self.intercept(&req) {
            Some(res) => res,
            None => match self.router.lookup(&method, &path) {
                Lookup::Found(handler, params) => {
                    req.set_params(params);
                    handler.call(req).await
                }
                Lookup::MethodNotAllowed(allowed) => {
                    let allow = allowed.iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    Response::builder()
                        .status(StatusCode::METHOD_NOT_ALLOWED)
                        .header(ALLOW.as_str(), &allow)
                        .no_body()
                }
                Lookup::NotFound => Response::status(StatusCode::NOT_FOUND),
            },
        };

        debug!(
            %method,
            %path,
            status = response.status_code().as_u16(),
            latency_us = started.elapsed().as_micros() as u64,
            "request"
        );
        response
    }

    fn intercept(&self, req: &Request) -> Option<Response> {
        self.middleware.iter().find_map(|m| match m.handle(req) {
            Next::Respond(res) => Some(res),
            Next::Continue => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use http::Method;

    use super::*;
    use crate::middleware::{AccessGate, AuthFlag};

    async fn hello(req: Request) -> Response {
        Response::text(format!("hello {}", req.param("name").unwrap_or("?")))
    }

    fn app(flag: &AuthFlag) -> App {
        App::new(Router::new().get("/dashboard/{name}", hello))
            .layer(AccessGate::new("/dashboard", "/login", flag.clone()))
    }

    #[tokio::test]
    async fn routes_through_open_gate() {
        let res = app(&AuthFlag::new(true))
            .handle(Request::new(Method::GET, "/dashboard/team"))
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"hello team");
    }

    #[tokio::test]
    async fn closed_gate_never_reaches_router() {
        let res = app(&AuthFlag::new(false))
            .handle(Request::new(Method::GET, "/dashboard/team"))
            .await;
        assert_eq!(res.status_code(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn wrong_method_lists_allowed() {
        let res = app(&AuthFlag::new(true))
            .handle(Request::new(Method::POST, "/dashboard/team"))
            .await;
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.header("allow"), Some("GET"));
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let res = app(&AuthFlag::new(true)).handle(Request::new(Method::GET, "/nowhere")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }
}
