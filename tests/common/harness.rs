//! Test server harness.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use parking_lot::Mutex;
use rerank_gateway::gateway::{HandlerState, create_router_with_state};
use rerank_gateway::reranker::RerankBackend;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
}

/// Serves `app` on an ephemeral localhost port until the returned handle drops.
async fn serve(app: Router) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Spawns the real gateway router backed by `reranker`.
///
/// The caller keeps its own `Arc` so a `MockReranker` can be inspected after
/// requests complete.
///
/// ```ignore
/// let mock = Arc::new(MockReranker::new());
/// let server = spawn_test_server(Arc::clone(&mock)).await?;
/// let client = TestClient::new(server.url());
/// ```
pub async fn spawn_test_server<R>(reranker: Arc<R>) -> Result<TestServer, ServerStartupError>
where
    R: RerankBackend + 'static,
{
    serve(create_router_with_state(HandlerState::from_shared(reranker))).await
}

/// One request as seen by the fake Workers AI endpoint.
#[derive(Debug, Clone)]
pub struct RecordedUpstreamCall {
    pub account_id: String,
    pub model: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct FakeUpstreamState {
    calls: Arc<Mutex<Vec<RecordedUpstreamCall>>>,
    status: StatusCode,
    body: serde_json::Value,
}

/// Stand-in for `api.cloudflare.com/client/v4`.
pub struct FakeWorkersAi {
    pub server: TestServer,
    calls: Arc<Mutex<Vec<RecordedUpstreamCall>>>,
}

impl FakeWorkersAi {
    /// API base to hand to `WorkersAiConfig::with_api_base`.
    pub fn api_base(&self) -> String {
        self.server.url()
    }

    pub fn calls(&self) -> Vec<RecordedUpstreamCall> {
        self.calls.lock().clone()
    }
}

async fn fake_run_handler(
    State(state): State<FakeUpstreamState>,
    Path((account_id, model)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.calls.lock().push(RecordedUpstreamCall {
        account_id,
        model,
        authorization,
        body,
    });

    (state.status, Json(state.body.clone())).into_response()
}

/// Spawns a fake Workers AI API that answers every run call with `status` and `body`.
pub async fn spawn_fake_workers_ai(
    status: StatusCode,
    body: serde_json::Value,
) -> Result<FakeWorkersAi, ServerStartupError> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = FakeUpstreamState {
        calls: Arc::clone(&calls),
        status,
        body,
    };

    let app = Router::new()
        .route("/accounts/{account_id}/ai/run/{*model}", post(fake_run_handler))
        .with_state(state);

    let server = serve(app).await?;
    Ok(FakeWorkersAi { server, calls })
}
