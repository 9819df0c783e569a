//! Fake inventory API for integration tests.
//!
//! Serves `/v1/traps` and `/v1/samplings` from in-memory JSON on a random
//! local port, the way the real API does: a probe without query parameters
//! answers with the `total-count` header, `?page=&size=` answers with one
//! page. Requests lacking the credential header get a 401. Every request URL
//! is recorded so tests can count page requests.

use std::net::TcpListener;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use serde_json::Value;

use crate::http::TOTAL_COUNT_HEADER;

const TRAPS_PATH: &str = "/v1/traps";
const SAMPLINGS_PATH: &str = "/v1/samplings";

#[derive(Debug, Default)]
struct State {
    traps: Vec<Value>,
    samplings: Vec<Value>,
    requests: Vec<String>,
    failing_page: Option<u64>,
}

/// A running fake API. The server stops when this is dropped.
pub struct FakeApi {
    server: Arc<tiny_http::Server>,
    base_url: String,
    state: Arc<Mutex<State>>,
    worker: Option<JoinHandle<()>>,
}

impl FakeApi {
    /// Start serving `traps` and `samplings` on `127.0.0.1:<random port>`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind.
    #[must_use]
    pub fn start(traps: Vec<Value>, samplings: Vec<Value>) -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("fake API should bind"));
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("fake API should listen on an IP address");
        let state = Arc::new(Mutex::new(State {
            traps,
            samplings,
            ..State::default()
        }));

        let worker = {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for request in server.incoming_requests() {
                    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                    let response = respond(&mut state, &request);
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            base_url: format!("http://127.0.0.1:{port}"),
            state,
            worker: Some(worker),
        }
    }

    #[must_use]
    pub fn traps_url(&self) -> String {
        format!("{}{TRAPS_PATH}", self.base_url)
    }

    #[must_use]
    pub fn samplings_url(&self) -> String {
        format!("{}{SAMPLINGS_PATH}", self.base_url)
    }

    /// Make every request for `page` (either collection) answer 500.
    pub fn fail_page(&self, page: u64) {
        self.lock().failing_page = Some(page);
    }

    /// Every request URL received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    /// Number of page requests (not probes) received for `path`.
    #[must_use]
    pub fn page_requests(&self, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|url| url.starts_with(path) && url.contains("page="))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// A URL on a local port nothing listens on; connecting to it is refused.
///
/// # Panics
///
/// Panics if no local port can be reserved.
#[must_use]
pub fn unreachable_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("should reserve a port");
    let port = listener
        .local_addr()
        .expect("reserved port should have an address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}{path}")
}

type Reply = tiny_http::Response<std::io::Cursor<Vec<u8>>>;

fn respond(state: &mut State, request: &tiny_http::Request) -> Reply {
    let url = request.url().to_string();
    state.requests.push(url.clone());

    let authorized = request
        .headers()
        .iter()
        .any(|h| h.field.equiv("API_KEY") && h.value.as_str() == "ROLE_ADMINISTRATOR");
    if !authorized {
        return tiny_http::Response::from_string("missing credential").with_status_code(401);
    }

    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
    let items = match path {
        TRAPS_PATH => &state.traps,
        SAMPLINGS_PATH => &state.samplings,
        _ => return tiny_http::Response::from_string("not found").with_status_code(404),
    };

    let mut page = None;
    let mut size = None;
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some(("page", v)) => page = v.parse::<u64>().ok(),
            Some(("size", v)) => size = v.parse::<u64>().ok(),
            _ => {}
        }
    }

    let body = match (page, size) {
        (Some(page), Some(size)) if page > 0 && size > 0 => {
            if state.failing_page == Some(page) {
                return tiny_http::Response::from_string("page exploded").with_status_code(500);
            }
            let start = usize::try_from((page - 1) * size).unwrap_or(usize::MAX);
            let end = usize::try_from(page * size).unwrap_or(usize::MAX);
            let slice = items
                .get(start.min(items.len())..end.min(items.len()))
                .unwrap_or_default();
            Value::Array(slice.to_vec())
        }
        _ => Value::Array(Vec::new()),
    };

    json_reply(&body.to_string()).with_header(
        tiny_http::Header::from_bytes(TOTAL_COUNT_HEADER, items.len().to_string())
            .expect("total-count header should be valid"),
    )
}

fn json_reply(body: &str) -> Reply {
    tiny_http::Response::from_string(body).with_header(
        tiny_http::Header::from_bytes("Content-Type", "application/json")
            .expect("content-type header should be valid"),
    )
}
