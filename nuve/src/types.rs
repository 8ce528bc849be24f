use std::fmt::{Debug, Display, Formatter};

use bytes::Bytes;
use nuve_core::hash::base64_decode;
use nuve_core::utils::Redact;
use nuve_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options attached to a room at creation time.
///
/// Known fields are typed; anything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomOptions {
    /// Create a peer to peer room instead of a relayed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2p: Option<bool>,
    /// Free-form data stored with the room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RoomOptions {
    /// Parse options from a JSON object.
    ///
    /// Blank input yields empty options.
    pub fn from_json(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(s).map_err(|e| {
            Error::request_invalid(format!("room options must be a JSON object: {e}"))
                .with_source(e)
        })
    }
}

#[derive(Serialize)]
pub(crate) struct CreateRoomRequest<'a> {
    pub name: &'a str,
    pub options: &'a RoomOptions,
}

#[derive(Serialize)]
pub(crate) struct CreateTokenRequest {}

#[derive(Serialize)]
pub(crate) struct CreateServiceRequest<'a> {
    pub name: &'a str,
    pub key: &'a str,
}

#[derive(Serialize)]
pub(crate) struct DeleteServiceRequest {
    pub forced: bool,
}

/// Serialize a request body.
pub(crate) fn encode<T: Serialize>(body: &T) -> Result<Bytes> {
    serde_json::to_vec(body).map(Bytes::from).map_err(|e| {
        Error::encoding(format!("failed to encode request body: {e}")).with_source(e)
    })
}

/// A room as listed by Nuve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2p: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Display for Room {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A service registered in Nuve.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Debug for Service {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("key", &Redact::from(&self.key))
            .field("rooms", &self.rooms)
            .finish()
    }
}

impl Display for Service {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {} room(s)", self.name, self.id, self.rooms.len())
    }
}

/// A user connected to a room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.role)
    }
}

/// Error payload Nuve sends along with a failed call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub code: i64,
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.msg, self.code)
    }
}

/// Decode the payload returned by `create_token`.
///
/// Nuve answers with the token as a base64 string, optionally quoted.
pub fn decode_token(payload: &[u8]) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| Error::response_body("token payload is not utf-8").with_source(e))?;
    let text = text.trim().trim_matches('"');

    base64_decode(text)
        .map_err(|e| Error::response_body("token payload is not base64").with_source(e))
}
