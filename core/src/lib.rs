//! Core components for signing and sending Nuve API requests.
//!
//! This crate provides the foundational types and traits shared by the nuve
//! crates. It does not know about MAuth itself; it only defines the seams a
//! signing scheme and an HTTP transport plug into.
//!
//! ## Overview
//!
//! - **Context**: holds the HTTP transport ([`HttpSend`]) and environment access ([`Env`])
//! - **Traits**: [`ProvideCredential`] loads credentials, [`SignRequest`] signs a request in place
//! - **Signer**: caches the loaded credential and drives [`SignRequest`] for every request
//! - **Error**: one [`Error`] type with an [`ErrorKind`] callers can branch on
//!
//! ## Example
//!
//! ```no_run
//! use nuve_core::{Context, Error, ProvideCredential, Result, SignRequest, Signer, SigningCredential};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential { key: "my-key".to_string() }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyBuilder;
//!
//! #[async_trait]
//! impl SignRequest for MyBuilder {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         req: &mut http::request::Parts,
//!         cred: Option<&Self::Credential>,
//!     ) -> Result<()> {
//!         let cred = cred.ok_or_else(|| Error::credential_invalid("missing credential"))?;
//!         req.headers.insert(http::header::AUTHORIZATION, cred.key.parse()?);
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), MyLoader, MyBuilder);
//!
//! let (mut parts, _) = http::Request::get("http://localhost:3000/rooms/")
//!     .body(())?
//!     .into_parts();
//! signer.sign(&mut parts).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SignRequest, SigningCredential};
mod signer;
pub use signer::Signer;
