//! Local stub of the chat API for tests.
//!
//! Routes are matched on method and path (query ignored). Every request is
//! recorded so tests can assert on what went over the wire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use crate::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct CannedResponse {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct StubState {
    routes: HashMap<(Method, String), CannedResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Builder for a stub API server.
#[derive(Default)]
pub struct StubApi {
    routes: HashMap<(Method, String), CannedResponse>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn respond(self, method: Method, path: &str, status: u16, body: serde_json::Value) -> Self {
        self.respond_raw(method, path, status, &body.to_string())
    }

    /// Answer `method path` with `status` and a raw body.
    pub fn respond_raw(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert((method, path.to_owned()), CannedResponse { status, body: body.to_owned(), delay: None });
        self
    }

    /// Answer `method path` with `status` and no body.
    pub fn respond_empty(self, method: Method, path: &str, status: u16) -> Self {
        self.respond_raw(method, path, status, "")
    }

    /// Hold the response for `method path` back by `delay`. The route must
    /// already be registered.
    pub fn delay(mut self, method: Method, path: &str, delay: Duration) -> Self {
        let Some(canned) = self.routes.get_mut(&(method.clone(), path.to_owned())) else {
            panic!("delay set for unregistered route {method} {path}");
        };
        canned.delay = Some(delay);
        self
    }

    /// Bind to an ephemeral local port and serve in the background.
    pub async fn spawn(self) -> RunningStub {
        let state = Arc::new(StubState { routes: self.routes, requests: Mutex::new(Vec::new()) });
        let app = Router::new().fallback(stub_handler).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("stub listener should bind");
        let addr = listener.local_addr().expect("stub listener should have an address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server failed");
        });
        RunningStub { base_url: format!("http://{addr}"), state }
    }
}

pub struct RunningStub {
    pub base_url: String,
    state: Arc<StubState>,
}

impl RunningStub {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url).expect("client should build")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("stub mutex should lock").clone()
    }

    /// The single request the test expects to have been made.
    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
        requests.into_iter().next().expect("one request")
    }
}

async fn stub_handler(State(state): State<Arc<StubState>>, method: Method, uri: Uri, body: String) -> Response {
    let path = uri.path().to_owned();
    state.requests.lock().expect("stub mutex should lock").push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_owned),
        body,
    });

    let Some(canned) = state.routes.get(&(method, path)).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }
    let status = StatusCode::from_u16(canned.status).expect("canned status should be valid");
    if canned.body.is_empty() {
        return status.into_response();
    }
    (status, [(header::CONTENT_TYPE, "application/json")], canned.body).into_response()
}
