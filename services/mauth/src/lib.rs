//! MAuth signer for the Nuve API.
//!
//! Every request to Nuve carries an `Authorization` header of the form
//!
//! ```text
//! MAuth realm=<realm>,mauth_signature_method=HMAC_SHA1[,mauth_username=<b64>,mauth_role=<b64>],
//! mauth_serviceid=<id>,mauth_cnonce=<nonce>,mauth_timestamp=<ms>,mauth_signature=<sig>
//! ```
//!
//! where `sig = base64(hex(HMAC-SHA1(service_key, timestamp,nonce[,username,role])))`.
//!
//! ## Example
//!
//! ```no_run
//! use nuve_core::{Context, OsEnv, Signer};
//! use nuve_mauth::{DefaultCredentialProvider, DelegatedPrincipal, RequestSigner};
//!
//! # async fn example() -> nuve_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//! let mut req = http::Request::post("http://localhost:3000/rooms/r1/tokens").body(())?;
//! req.extensions_mut().insert(DelegatedPrincipal::new("alice", "presenter"));
//! let (mut parts, _) = req.into_parts();
//! signer.sign(&mut parts).await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{MAUTH_REALM, MAUTH_SIGNATURE_METHOD, NUVE_SERVICE_ID, NUVE_SERVICE_KEY};

mod credential;
pub use credential::Credential;

mod principal;
pub use principal::DelegatedPrincipal;

mod nonce;
pub use nonce::{GenerateNonce, RandomNonce};

mod sign_request;
pub use sign_request::{sign, RequestSigner, SigningContext};

mod verify;
pub use verify::ParsedAuthorization;

mod provide_credential;
pub use provide_credential::*;
