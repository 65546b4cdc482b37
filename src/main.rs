//! trellis binary.
//!
//! Run with:
//!   RUST_LOG=debug cargo run -- --addr 127.0.0.1:3000
//!
//! Try:
//!   curl 'http://localhost:3000/api/todos?query=code'
//!   curl -X POST http://localhost:3000/api/todos -d '{"title":"X","completed":false}'
//!   curl -X PATCH http://localhost:3000/api/todos/3 -d '{"completed":true}'
//!   curl -X DELETE http://localhost:3000/api/todos/2

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trellis::middleware::AuthFlag;
use trellis::todos::TodoStore;
use trellis::{Config, Server, service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let store = Arc::new(TodoStore::seeded());
    info!(todos = store.len(), authenticated = config.authenticated, "store seeded");

    let app = service::app(&config, store, AuthFlag::new(config.authenticated));

    Server::bind(&config.addr)?
        .serve(app)
        .await
        .with_context(|| format!("serving on {}", config.addr))
}
