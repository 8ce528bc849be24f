use bytes::Bytes;
use http::Method;
use nuve_core::Result;
use nuve_mauth::DelegatedPrincipal;

use crate::constants::{ROOMS, TOKENS};
use crate::types::{encode, CreateRoomRequest, CreateTokenRequest, RoomOptions};
use crate::Client;

impl Client {
    /// Create a room named `name`.
    pub async fn create_room(&self, name: &str, options: RoomOptions) -> Result<Bytes> {
        let body = encode(&CreateRoomRequest {
            name,
            options: &options,
        })?;
        self.send(Method::POST, ROOMS, Some(body), None).await
    }

    /// List all rooms of the service.
    pub async fn get_rooms(&self) -> Result<Bytes> {
        self.send(Method::GET, ROOMS, None, None).await
    }

    pub async fn get_room(&self, room: &str) -> Result<Bytes> {
        self.send(Method::GET, &format!("{ROOMS}{room}"), None, None)
            .await
    }

    pub async fn delete_room(&self, room: &str) -> Result<Bytes> {
        self.send(Method::DELETE, &format!("{ROOMS}{room}"), None, None)
            .await
    }

    /// Ask Nuve for a token that lets `user` join `room` as `role`.
    ///
    /// The user and role travel in the MAuth header, not in the body. The
    /// payload is the base64 token, see [`decode_token`](crate::decode_token).
    pub async fn create_token(&self, room: &str, user: &str, role: &str) -> Result<Bytes> {
        let body = encode(&CreateTokenRequest {})?;
        self.send(
            Method::POST,
            &format!("{ROOMS}{room}{TOKENS}"),
            Some(body),
            Some(DelegatedPrincipal::new(user, role)),
        )
        .await
    }
}
