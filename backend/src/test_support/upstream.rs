//! Local HTTP stand-in for upstream APIs.
//!
//! Runs a real Actix server on `127.0.0.1:0` that answers canned responses by
//! path and records every request it sees. Start it from inside
//! `#[actix_web::test]` so the server future can be spawned on the test's
//! system.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use reqwest::Url;
use serde_json::Value;

/// Canned upstream reply.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    body: String,
}

impl StubResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
        }
    }
}

/// Request as observed by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub query: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

struct StubState {
    routes: HashMap<String, StubResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Running stub server.
pub struct UpstreamStub {
    base_url: Url,
    handle: ServerHandle,
    state: Arc<StubState>,
}

impl UpstreamStub {
    /// Serve `routes`, keyed by exact request path.
    pub fn start<'a>(routes: impl IntoIterator<Item = (&'a str, StubResponse)>) -> Self {
        let state = Arc::new(StubState {
            routes: routes
                .into_iter()
                .map(|(path, response)| (path.to_owned(), response))
                .collect(),
            requests: Mutex::new(Vec::new()),
        });
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let data = web::Data::from(state.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen on stub socket")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: Url::parse(&format!("http://{addr}")).expect("stub URL"),
            handle,
            state,
        }
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests mutex").clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// Base URL of a port with nothing listening on it.
pub fn unreachable_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("probe URL")
}

async fn respond(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let headers = req
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_owned(), value.to_owned()))
        })
        .collect();
    state
        .requests
        .lock()
        .expect("requests mutex")
        .push(RecordedRequest {
            method: req.method().to_string(),
            query: req.query_string().to_owned(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    match state.routes.get(req.path()) {
        Some(stub) => HttpResponse::build(
            StatusCode::from_u16(stub.status).expect("valid stub status"),
        )
        .content_type("application/json")
        .body(stub.body.clone()),
        None => HttpResponse::NotImplemented().body(format!("no stub for {}", req.path())),
    }
}
