//! Failure injection tests: the firewall answers with gateway errors and
//! keeps serving.

use std::time::Duration;

use api_firewall::config::parse_rules;
use api_firewall::{FirewallConfig, FirewallServer};
use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use futures_util::stream;
use tower::ServiceExt;

mod common;

use common::{client, closed_port, start_firewall, start_stub_upstream, StubReply};

#[tokio::test]
async fn test_upstream_down_is_bad_gateway() {
    let dead = closed_port().await;
    let firewall = start_firewall(&format!("http://{}", dead), "", |_| {}).await;
    let client = client();

    for _ in 0..3 {
        let res = client.get(firewall.url("/athlete-info")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }
}

#[tokio::test]
async fn test_slow_upstream_times_out_and_firewall_recovers() {
    let upstream = start_stub_upstream(|req| {
        if req.uri == "/slow" {
            StubReply::new(200, "late").delayed(Duration::from_secs(3))
        } else {
            StubReply::new(200, "fast")
        }
    })
    .await;
    let firewall = start_firewall(&upstream.base_url(), "", |config| {
        config.timeouts.request_secs = 1;
    })
    .await;
    let client = client();

    let res = client.get(firewall.url("/slow")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);

    let res = client.get(firewall.url("/fast")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "fast");
}

#[tokio::test]
async fn test_broken_response_body_sends_nothing_of_it() {
    let upstream = start_stub_upstream(|_| {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from("partial stats")),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "upstream died")),
        ];
        StubReply::new(200, "").with_body(Body::from_stream(stream::iter(chunks)))
    })
    .await;
    let rules = "rules:\n  - endpoint: /athlete-info\n    forbidden_response_re: [secret]\n";
    let firewall = start_firewall(&upstream.base_url(), rules, |_| {}).await;

    let res = client().get(firewall.url("/athlete-info")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(res.text().await.unwrap(), "");
}

#[tokio::test]
async fn test_unrestricted_paths_unaffected_by_failures_elsewhere() {
    let upstream = start_stub_upstream(|req| {
        if req.uri == "/boom" {
            StubReply::new(503, "maintenance")
        } else {
            StubReply::new(200, "fine")
        }
    })
    .await;
    let firewall = start_firewall(&upstream.base_url(), "", |_| {}).await;
    let client = client();

    let res = client.get(firewall.url("/boom")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.text().await.unwrap(), "maintenance");

    let res = client.get(firewall.url("/ok")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn test_truncated_request_body_forwards_bytes_read() {
    let upstream = start_stub_upstream(|_| StubReply::new(200, "accepted")).await;

    let mut config = FirewallConfig::default();
    config.upstream.base_url = upstream.base_url();
    config.timeouts.request_secs = 5;
    let rules = parse_rules("rules:\n  - endpoint: /a\n    forbidden_request_re: [secret]\n").unwrap();
    let server = FirewallServer::new(config, rules).unwrap();

    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from("hello")),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "client went away")),
    ];
    let request = Request::builder()
        .method("POST")
        .uri("/a")
        .header("content-length", "20")
        .body(Body::from_stream(stream::iter(chunks)))
        .unwrap();

    let response = server.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream.calls(), 1);
    let seen = upstream.last_request();
    assert_eq!(&seen.body[..], b"hello");
    assert_eq!(seen.header_values("content-length"), vec!["5"]);
}
