//! Network transport to the protected service.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::TimeoutConfig;
use crate::error::FirewallError;
use crate::transport::Transport;

/// Plain HTTP/1.1 client transport.
#[derive(Clone)]
pub struct UpstreamTransport {
    client: Client<HttpConnector, Body>,
}

impl UpstreamTransport {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client }
    }
}

impl Transport for UpstreamTransport {
    fn send(&self, request: Request<Body>) -> BoxFuture<'_, Result<Response<Body>, FirewallError>> {
        Box::pin(async move {
            let response: Response<Incoming> = self.client.request(request).await?;
            Ok(response.map(Body::new))
        })
    }
}
