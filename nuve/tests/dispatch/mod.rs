use std::time::{Duration, Instant};

use http::header::CONTENT_TYPE;
use http::{Method, StatusCode};
use nuve::{CancellationToken, Client, Config, ErrorKind, Result};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{init_client, init_logger, verified_authorization};

#[tokio::test]
async fn test_every_request_is_signed_json() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new());
    client.get_rooms().await?;
    client.get_rooms().await?;

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 2);
    for req in &received {
        assert_eq!(req.headers[CONTENT_TYPE], "application/json");
        assert!(req.body.is_empty());
    }

    let first = verified_authorization(&received[0]);
    let second = verified_authorization(&received[1]);
    assert_ne!(first.signature, second.signature);
    Ok(())
}

#[tokio::test]
async fn test_timeout_fires_on_slow_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new().with_timeout(100));

    let start = Instant::now();
    let err = client.get_rooms().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_zero_timeout_waits_for_slow_server() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("[]")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new().with_timeout(0));
    let body = client.get_rooms().await?;
    assert_eq!(&body[..], b"[]");
    Ok(())
}

#[tokio::test]
async fn test_cancel_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new().with_timeout(0));
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let err = client
        .send_with_cancel(&token, Method::GET, "/rooms/", None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_non_success_body_is_returned() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"msg":"not found","code":1}"#))
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new());
    let body = client.get_room("missing").await?;
    assert_eq!(&body[..], br#"{"msg":"not found","code":1}"#);

    let resp = client
        .send_response(Method::GET, "/rooms/missing", None, None)
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_check_status_reports_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rooms/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"msg": "room not found", "code": 404})),
        )
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new().with_check_status(true));
    let err = client.delete_room("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Status);
    assert!(err.message().contains("room not found"));
}

#[tokio::test]
async fn test_refused_connection_is_transport() {
    init_logger();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(
        Config::new()
            .with_host(format!("http://{addr}"))
            .with_service("svc1", "key"),
    )
    .unwrap();
    let err = client.get_rooms().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
