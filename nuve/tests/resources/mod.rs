use nuve::{decode_token, Config, Result, Room, RoomOptions, User};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{init_client, verified_authorization};

#[tokio::test]
async fn test_create_token_delegates_principal() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rooms/r1/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_string("dG9rZW4="))
        .expect(1)
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new());
    let payload = client.create_token("r1", "alice", "presenter").await?;
    assert_eq!(decode_token(&payload)?, b"token");

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received[0].body, b"{}");

    let auth = verified_authorization(&received[0]);
    let principal = auth
        .context
        .principal
        .clone()
        .expect("principal must be present");
    assert_eq!(principal.username(), "YWxpY2U=");
    assert_eq!(principal.role(), "cHJlc2VudGVy");
    Ok(())
}

#[tokio::test]
async fn test_get_rooms_returns_raw_listing() -> Result<()> {
    let listing = json!([{"_id": "r1", "name": "lobby"}, {"_id": "r2", "name": "stage", "p2p": true}]);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing.clone()))
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new());
    let body = client.get_rooms().await?;

    assert_eq!(serde_json::from_slice::<Value>(&body)?, listing);
    let rooms: Vec<Room> = serde_json::from_slice(&body)?;
    assert_eq!(rooms[1].name, "stage");
    assert_eq!(rooms[1].p2p, Some(true));

    let received = server.received_requests().await.unwrap_or_default();
    assert!(verified_authorization(&received[0]).context.principal.is_none());
    Ok(())
}

#[tokio::test]
async fn test_create_room_body() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rooms/"))
        .and(body_json(json!({"name": "lobby", "options": {"p2p": true}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "r1", "name": "lobby"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new());
    let body = client
        .create_room("lobby", RoomOptions::from_json(r#"{"p2p":true}"#)?)
        .await?;
    let room: Room = serde_json::from_slice(&body)?;
    assert_eq!(room.id, "r1");
    Ok(())
}

#[test_case(true, r#"{"forced":true}"# ; "forced")]
#[test_case(false, r#"{"forced":false}"# ; "not forced")]
#[tokio::test]
async fn test_delete_service(forced: bool, expected: &'static str) {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/services/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Service deleted"))
        .expect(1)
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new());
    let body = client.delete_service("s1", forced).await.unwrap();
    assert_eq!(&body[..], b"Service deleted");

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(String::from_utf8_lossy(&received[0].body), expected);
    verified_authorization(&received[0]);
}

#[tokio::test]
async fn test_create_service_body() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/"))
        .and(body_json(json!({"name": "svc", "key": "k"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new());
    client.create_service("svc", "k").await?;
    Ok(())
}

#[test_case("GET", "/services/", None ; "get services")]
#[test_case("GET", "/services/s1", Some("s1") ; "get service")]
#[tokio::test]
async fn test_service_reads(verb: &'static str, expected: &'static str, id: Option<&'static str>) {
    let server = MockServer::start().await;
    Mock::given(method(verb))
        .and(path(expected))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new());
    let body = match id {
        Some(id) => client.get_service(id).await,
        None => client.get_services().await,
    }
    .unwrap();
    assert_eq!(&body[..], b"{}");
}

#[tokio::test]
async fn test_user_paths() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/r1/users/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"name": "alice", "role": "presenter"}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rooms/r1/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "alice", "role": "presenter"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rooms/r1/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User deleted"))
        .expect(1)
        .mount(&server)
        .await;

    let client = init_client(&server, Config::new());

    let users: Vec<User> = serde_json::from_slice(&client.get_users("r1").await?)?;
    assert_eq!(users[0].to_string(), "alice [presenter]");

    let user: User = serde_json::from_slice(&client.get_user("r1", "alice").await?)?;
    assert_eq!(user.role, "presenter");

    assert_eq!(&client.delete_user("r1", "alice").await?[..], b"User deleted");
    Ok(())
}
