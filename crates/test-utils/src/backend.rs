use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use parking_lot::Mutex;
use serde_json::Value;
use std::{net::SocketAddr, sync::Arc};

/// A request received by the [`MockBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: &'static str,
    pub body: Value,
}

#[derive(Debug)]
struct Shared {
    requests: Mutex<Vec<RecordedRequest>>,
    status: Mutex<StatusCode>,
}

/// In-process order backend serving the token transfer endpoints on a random local port.
#[derive(Clone, Debug)]
pub struct MockBackend {
    addr: SocketAddr,
    shared: Arc<Shared>,
}

impl MockBackend {
    /// Binds to `127.0.0.1:0` and serves in the background until the runtime shuts down.
    pub async fn spawn() -> Self {
        let shared = Arc::new(Shared {
            requests: Mutex::new(Vec::new()),
            status: Mutex::new(StatusCode::OK),
        });

        let app = Router::new()
            .route("/api/token/transfer", post(transfer))
            .route("/api/token/transfer/confirm", post(confirm))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, shared }
    }

    /// Base URL of the server, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answers every following request with `status`.
    pub fn respond_with(&self, status: u16) {
        *self.shared.status.lock() = StatusCode::from_u16(status).unwrap();
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().clone()
    }
}

async fn transfer(State(shared): State<Arc<Shared>>, Json(body): Json<Value>) -> StatusCode {
    record(&shared, "/api/token/transfer", body)
}

async fn confirm(State(shared): State<Arc<Shared>>, Json(body): Json<Value>) -> StatusCode {
    record(&shared, "/api/token/transfer/confirm", body)
}

fn record(shared: &Shared, path: &'static str, body: Value) -> StatusCode {
    shared.requests.lock().push(RecordedRequest { path, body });
    *shared.status.lock()
}
