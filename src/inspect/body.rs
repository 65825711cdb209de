//! Body buffering.

use axum::body::{Body, Bytes};
use http_body_util::BodyExt;

/// A body read to completion, or as far as it could be read.
#[derive(Debug)]
pub struct BufferedBody {
    /// Every data frame received before the body ended or failed.
    pub bytes: Bytes,
    /// Set when the body failed mid-stream.
    pub error: Option<axum::Error>,
}

/// Read `body` once, keeping partial data if the stream fails.
///
/// Trailers are dropped.
pub async fn buffer_body(mut body: Body) -> BufferedBody {
    let mut chunks: Vec<Bytes> = Vec::new();
    let mut error = None;

    while let Some(frame) = body.frame().await {
        match frame {
            Ok(frame) => {
                if let Ok(data) = frame.into_data() {
                    chunks.push(data);
                }
            }
            Err(e) => {
                error = Some(e);
                break;
            }
        }
    }

    let bytes = match chunks.len() {
        0 => Bytes::new(),
        1 => chunks.pop().unwrap_or_default(),
        _ => Bytes::from(chunks.concat()),
    };

    BufferedBody { bytes, error }
}
