//! Path-prefix access gate.
//!
//! Requests under a protected prefix are redirected to a login path unless
//! the configured [`Authenticator`] accepts them. Everything else passes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use super::{Middleware, Next};
use crate::{Request, Response};

/// Decides whether a request is authenticated.
pub trait Authenticator: Send + Sync + 'static {
    fn is_authenticated(&self, req: &Request) -> bool;
}

/// A process-wide authentication switch.
///
/// Clones share the same flag, so a handle kept outside the gate can flip it
/// at runtime.
#[derive(Clone, Debug)]
pub struct AuthFlag(Arc<AtomicBool>);

impl AuthFlag {
    pub fn new(authenticated: bool) -> Self {
        Self(Arc::new(AtomicBool::new(authenticated)))
    }

    pub fn set(&self, authenticated: bool) {
        self.0.store(authenticated, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Authenticator for AuthFlag {
    fn is_authenticated(&self, _req: &Request) -> bool {
        self.get()
    }
}

impl<F> Authenticator for F
where
    F: Fn(&Request) -> bool + Send + Sync + 'static,
{
    fn is_authenticated(&self, req: &Request) -> bool {
        self(req)
    }
}

/// Redirects unauthenticated requests under `prefix` to `login_path`.
///
/// Matching is a plain string prefix test on the path, so `/dashboard`,
/// `/dashboard/team` and `/dashboards` are all protected by `/dashboard`.
pub struct AccessGate {
    prefix: String,
    login_path: String,
    auth: Arc<dyn Authenticator>,
}

impl AccessGate {
    pub fn new(
        prefix: impl Into<String>,
        login_path: impl Into<String>,
        auth: impl Authenticator,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            login_path: login_path.into(),
            auth: Arc::new(auth),
        }
    }
}

impl Middleware for AccessGate {
    fn handle(&self, req: &Request) -> Next {
        if req.path() == "/api/todos" {
            debug!(method = %req.method(), "todo collection request");
        }

        if req.path().starts_with(&self.prefix) && !self.auth.is_authenticated(req) {
            warn!(path = req.path(), to = %self.login_path, "unauthenticated, redirecting");
            return Next::Respond(Response::redirect(&self.login_path));
        }

        Next::Continue
    }
}
