//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_firewall::config::parse_rules;
use api_firewall::{FirewallConfig, FirewallServer, Shutdown};
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{Request, Response};
use axum::Router;
use tokio::net::TcpListener;

/// A request as the stub upstream received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl RecordedRequest {
    /// All values of `name`, in arrival order.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// What the stub upstream answers.
pub struct StubReply {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: Body,
    pub delay: Option<Duration>,
}

impl StubReply {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::from(body),
            delay: None,
        }
    }

    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }
}

type Responder = dyn Fn(&RecordedRequest) -> StubReply + Send + Sync;

#[derive(Clone)]
struct StubState {
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<RecordedRequest>>>,
    respond: Arc<Responder>,
}

/// Handle on a running stub upstream.
pub struct StubUpstream {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.seen
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("stub upstream saw no request")
    }
}

async fn stub_handler(State(state): State<StubState>, request: Request<Body>) -> Response<Body> {
    state.calls.fetch_add(1, Ordering::SeqCst);

    let (parts, body) = request.into_parts();
    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        uri: parts.uri.to_string(),
        headers: parts
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default(),
    };

    let reply = (state.respond)(&recorded);
    state.seen.lock().unwrap().push(recorded);

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let mut builder = Response::builder().status(reply.status);
    for (name, value) in reply.headers {
        builder = builder.header(name, value);
    }
    builder.body(reply.body).unwrap()
}

/// Start a programmable upstream on an ephemeral port.
pub async fn start_stub_upstream<F>(respond: F) -> StubUpstream
where
    F: Fn(&RecordedRequest) -> StubReply + Send + Sync + 'static,
{
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        calls: calls.clone(),
        seen: seen.clone(),
        respond: Arc::new(respond),
    };

    let app = Router::new().fallback(stub_handler).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubUpstream { addr, calls, seen }
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// A running firewall. Shuts down when dropped.
pub struct TestFirewall {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestFirewall {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestFirewall {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the firewall in front of `upstream_base_url` with the given rules.
pub async fn start_firewall<F>(upstream_base_url: &str, rules_yaml: &str, tweak: F) -> TestFirewall
where
    F: FnOnce(&mut FirewallConfig),
{
    let mut config = FirewallConfig::default();
    config.upstream.base_url = upstream_base_url.to_string();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    tweak(&mut config);

    let rules = parse_rules(rules_yaml).unwrap();
    let server = FirewallServer::new(config, rules).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestFirewall { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
