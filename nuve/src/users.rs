use bytes::Bytes;
use http::Method;
use nuve_core::Result;

use crate::constants::{ROOMS, USERS};
use crate::Client;

impl Client {
    /// List users currently connected to `room`.
    pub async fn get_users(&self, room: &str) -> Result<Bytes> {
        self.send(Method::GET, &format!("{ROOMS}{room}{USERS}"), None, None)
            .await
    }

    pub async fn get_user(&self, room: &str, user: &str) -> Result<Bytes> {
        self.send(
            Method::GET,
            &format!("{ROOMS}{room}{USERS}{user}"),
            None,
            None,
        )
        .await
    }

    /// Kick `user` out of `room`.
    pub async fn delete_user(&self, room: &str, user: &str) -> Result<Bytes> {
        self.send(
            Method::DELETE,
            &format!("{ROOMS}{room}{USERS}{user}"),
            None,
            None,
        )
        .await
    }
}
