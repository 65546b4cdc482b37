use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use reqwest::StatusCode;
use reqwest::redirect::Policy;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use trellis::middleware::AuthFlag;
use trellis::todos::TodoStore;
use trellis::{Config, Error, Server, service};

struct Running {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), Error>>,
}

impl Running {
    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    async fn shutdown(self) -> Result<()> {
        let _ = self.stop.send(());
        self.handle.await??;
        Ok(())
    }
}

async fn start(flag: AuthFlag) -> Result<Running> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = service::app(&Config::default(), Arc::new(TodoStore::seeded()), flag);
    let (stop, stopped) = oneshot::channel::<()>();

    let handle = tokio::spawn(Server::serve_with_shutdown(listener, app, async {
        let _ = stopped.await;
    }));

    Ok(Running { addr, stop, handle })
}

fn client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().redirect(Policy::none()).build()?)
}

#[tokio::test]
async fn todo_lifecycle_over_http() -> Result<()> {
    let server = start(AuthFlag::new(true)).await?;
    let outcome = todo_lifecycle(&server).await;
    server.shutdown().await?;
    outcome
}

// Runs in its own scope so the client and every response, along with their
// keep-alive connections, are gone before the server drains.
async fn todo_lifecycle(server: &Running) -> Result<()> {
    let client = client()?;

    let todos: Vec<Value> = client.get(server.url("/api/todos")).send().await?.json().await?;
    assert_eq!(todos.len(), 5);
    assert_eq!(todos[0]["title"], "Complete project proposal");

    let res = client.get(server.url("/api/todos?query=slides")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let filtered: Vec<Value> = res.json().await?;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], 2);

    let res = client
        .post(server.url("/api/todos"))
        .json(&json!({ "title": "X", "completed": false }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?, json!({ "id": 6, "title": "X", "completed": false }));

    let res = client
        .patch(server.url("/api/todos/3"))
        .json(&json!({ "completed": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?, json!({ "id": 3, "completed": true }));

    let res = client.delete(server.url("/api/todos/2")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["title"], "Prepare presentation slides");

    let moved: Value = client.get(server.url("/api/todos/2")).send().await?.json().await?;
    assert_eq!(moved, json!({ "id": 3, "completed": true }));

    let todos: Vec<Value> = client.get(server.url("/api/todos")).send().await?.json().await?;
    assert_eq!(todos.len(), 5);

    let res = client.get(server.url("/api/todos/99")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(server.url("/api/todos"))
        .header("content-type", "application/json")
        .body("{\"title\":")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn dashboard_redirects_only_when_unauthenticated() -> Result<()> {
    let flag = AuthFlag::new(true);
    let server = start(flag.clone()).await?;
    let outcome = dashboard_gate(&server, &flag).await;
    server.shutdown().await?;
    outcome
}

async fn dashboard_gate(server: &Running, flag: &AuthFlag) -> Result<()> {
    let client = client()?;

    let res = client.get(server.url("/dashboard/analytics")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "dashboard");

    flag.set(false);
    let res = client.get(server.url("/dashboard/analytics")).send().await?;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/login");

    let res = client.get(server.url("/healthz")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "ok");

    Ok(())
}
