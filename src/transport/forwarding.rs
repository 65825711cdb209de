//! Inspecting transport.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;

use crate::error::FirewallError;
use crate::http::response::forbidden;
use crate::inspect::{RejectReason, RequestInspector, Verdict};
use crate::observability::metrics;
use crate::transport::Transport;

/// Response extension marking a synthetic rejection made before any
/// network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestRejected(pub RejectReason);

/// Runs [`RequestInspector`] on every send; delegates only allowed requests.
pub struct ForwardingTransport {
    inspector: RequestInspector,
    inner: Arc<dyn Transport>,
}

impl ForwardingTransport {
    pub fn new(inspector: RequestInspector, inner: Arc<dyn Transport>) -> Self {
        Self { inspector, inner }
    }
}

impl Transport for ForwardingTransport {
    fn send(
        &self,
        mut request: Request<Body>,
    ) -> BoxFuture<'_, Result<Response<Body>, FirewallError>> {
        Box::pin(async move {
            let path = request.uri().path().to_owned();

            match self.inspector.inspect(&path, &mut request).await {
                Verdict::Allow => self.inner.send(request).await,
                Verdict::Reject(reason) => {
                    tracing::info!(
                        path = %path,
                        stage = reason.stage(),
                        reason = %reason,
                        "request rejected"
                    );
                    metrics::record_rejection(reason);
                    let mut response = forbidden();
                    response.extensions_mut().insert(RequestRejected(reason));
                    Ok(response)
                }
            }
        })
    }
}
