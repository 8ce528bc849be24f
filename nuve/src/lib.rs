//! Client for the Nuve room and service API.
//!
//! Every call is signed with MAuth, sent as `application/json` and bounded by
//! the timeout from [`Config`]. Response bodies are handed back as raw bytes;
//! [`Room`], [`Service`], [`User`] and [`Message`] are there for callers who
//! want to decode them.
//!
//! ## Example
//!
//! ```no_run
//! use nuve::{decode_token, Client, Config, RoomOptions};
//!
//! # async fn example() -> nuve_core::Result<()> {
//! let config = Config::new()
//!     .with_host("http://localhost:3000")
//!     .with_service("service_id", "service_key");
//! let client = Client::new(config)?;
//!
//! client.create_room("lobby", RoomOptions::default()).await?;
//! let token = client.create_token("room_id", "alice", "presenter").await?;
//! let token = decode_token(&token)?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{NUVE_HOST, NUVE_PROXY, NUVE_REALM, NUVE_TIMEOUT};

mod config;
pub use config::Config;

mod client;
pub use client::{Client, ClientBuilder};

mod rooms;
mod services;
mod users;

mod types;
pub use types::{decode_token, Message, Room, RoomOptions, Service, User};

pub use nuve_core::{Error, ErrorKind, Result};
pub use nuve_mauth::DelegatedPrincipal;
pub use tokio_util::sync::CancellationToken;
