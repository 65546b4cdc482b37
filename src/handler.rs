//! Route handlers and how the router stores them.
//!
//! Two shapes are accepted:
//!
//! - a plain `Fn(Request)`, for handlers that need nothing but the request
//!   (the health checks);
//! - [`with_state`], pairing an `Arc<S>` with an `Fn(Arc<S>, Request)`, for
//!   handlers over shared state (the todo endpoints and their store).
//!
//! Either way the router ends up holding an `Arc<dyn ErasedHandler>`, so
//! differently typed handlers sit in the same tree.
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use trellis::{Request, Response, Router, with_state};
//! async fn greet(greeting: Arc<String>, _req: Request) -> Response {
//!     Response::text(greeting.as_str())
//! }
//!
//! Router::new().get("/", with_state(Arc::new(String::from("hi")), greet));
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// `#[doc(hidden)] pub` because it appears in [`Handler::into_boxed_handler`].
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Anything a route can be registered with.
///
/// Sealed: satisfied by `Fn(Request) -> impl Future<Output = impl
/// IntoResponse>` and by [`WithState`].
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Stateless ────────────────────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(Stateless(self))
    }
}

struct Stateless<F>(F);

impl<F, Fut, R> ErasedHandler for Stateless<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

// ── With state ───────────────────────────────────────────────────────────────

/// A handler bound to shared state. Built by [`with_state`].
pub struct WithState<S, F> {
    state: Arc<S>,
    f: F,
}

/// Binds `f` to `state`. Each request gets its own clone of the `Arc`, so
/// the handler future owns what it needs and nothing borrows across the
/// await.
pub fn with_state<S, F>(state: Arc<S>, f: F) -> WithState<S, F> {
    WithState { state, f }
}

impl<S, F, Fut, R> private::Sealed for WithState<S, F>
where
    S: Send + Sync + 'static,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<S, F, Fut, R> Handler for WithState<S, F>
where
    S: Send + Sync + 'static,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(self)
    }
}

impl<S, F, Fut, R> ErasedHandler for WithState<S, F>
where
    S: Send + Sync,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.f)(Arc::clone(&self.state), req);
        Box::pin(async move { fut.await.into_response() })
    }
}
