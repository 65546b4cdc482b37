//! Middleware layer.
//!
//! Middleware sees every request before routing and may answer it on the
//! spot. It is the place for cross-cutting checks such as access control.
//! Middleware runs in registration order; the first one to answer wins and
//! the router is never consulted.

mod gate;

pub use gate::{AccessGate, AuthFlag, Authenticator};

use crate::{Request, Response};

/// What a middleware decided about a request.
pub enum Next {
    /// Hand the request on to the next middleware, then the router.
    Continue,
    /// Answer now with this response.
    Respond(Response),
}

/// A pre-routing request check.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: &Request) -> Next;
}
