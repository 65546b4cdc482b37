//! Health-check handlers.
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can it serve traffic? |
//!
//! The todo store lives in memory and is ready as soon as the process is, so
//! both checks answer unconditionally.

use crate::{Request, Response};

pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
