//! MAuth request signer.
use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderValue;
use log::debug;
use nuve_core::hash::{base64_encode, hex_hmac_sha1};
use nuve_core::time::{now, unix_millis, DateTime};
use nuve_core::{Context, Error, Result, SignRequest};

use crate::constants::*;
use crate::nonce::{GenerateNonce, RandomNonce};
use crate::{Credential, DelegatedPrincipal};

/// Compute the MAuth signature of `string_to_sign`.
///
/// The lowercase hex form of HMAC-SHA1 is base64 encoded as text, not the raw
/// digest. Nuve verifies exactly this form.
pub fn sign(key: &[u8], string_to_sign: &[u8]) -> String {
    base64_encode(hex_hmac_sha1(key, string_to_sign).as_bytes())
}

/// SigningContext holds everything that changes per request.
///
/// Build a new one for every request; a reused context replays its
/// `(timestamp, nonce)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    /// Milliseconds since the unix epoch.
    pub timestamp_millis: i64,
    /// Client nonce.
    pub nonce: u32,
    /// Optional end user the request acts for.
    pub principal: Option<DelegatedPrincipal>,
}

impl SigningContext {
    /// Create a new signing context.
    pub fn new(timestamp_millis: i64, nonce: u32, principal: Option<DelegatedPrincipal>) -> Self {
        Self {
            timestamp_millis,
            nonce,
            principal,
        }
    }

    /// Construct string to sign
    ///
    /// ## Format
    ///
    /// ```text
    /// timestamp + "," + nonce [+ "," + username + "," + role]
    /// ```
    pub fn string_to_sign(&self) -> String {
        let mut s = format!("{},{}", self.timestamp_millis, self.nonce);
        if let Some(p) = &self.principal {
            s.push(',');
            s.push_str(p.username());
            s.push(',');
            s.push_str(p.role());
        }
        s
    }

    /// Assemble the `Authorization` header value.
    ///
    /// ```text
    /// MAuth realm=<realm>,mauth_signature_method=HMAC_SHA1[,mauth_username=<b64>,mauth_role=<b64>],
    /// mauth_serviceid=<id>,mauth_cnonce=<nonce>,mauth_timestamp=<ms>,mauth_signature=<sig>
    /// ```
    pub fn authorization(&self, realm: &str, service_id: &str, signature: &str) -> Result<String> {
        let mut s = String::with_capacity(192);
        write!(
            s,
            "{MAUTH_SCHEME} {REALM}={realm},{SIGNATURE_METHOD}={MAUTH_SIGNATURE_METHOD}"
        )?;
        if let Some(p) = &self.principal {
            write!(s, ",{USERNAME}={},{ROLE}={}", p.username(), p.role())?;
        }
        write!(
            s,
            ",{SERVICE_ID}={service_id},{CNONCE}={},{TIMESTAMP}={},{SIGNATURE}={signature}",
            self.nonce, self.timestamp_millis
        )?;
        Ok(s)
    }
}

/// RequestSigner that implements Nuve MAuth authorization.
///
/// The delegated principal, if any, is read from the request extensions.
#[derive(Debug)]
pub struct RequestSigner {
    realm: String,
    nonce: Arc<dyn GenerateNonce>,
    time: Option<DateTime>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner {
    /// Create a signer for the default realm with a fresh random nonce source.
    pub fn new() -> Self {
        Self {
            realm: MAUTH_REALM.to_string(),
            nonce: Arc::new(RandomNonce::new()),
            time: None,
        }
    }

    /// Announce a different realm.
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Replace the nonce source.
    pub fn with_nonce_generator(mut self, nonce: impl GenerateNonce) -> Self {
        self.nonce = Arc::new(nonce);
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Produce a fresh header value for one request.
    pub fn build_authorization(
        &self,
        cred: &Credential,
        principal: Option<DelegatedPrincipal>,
    ) -> Result<String> {
        let ctx = SigningContext::new(
            unix_millis(self.time.unwrap_or_else(now)),
            self.nonce.generate_nonce(),
            principal,
        );

        let string_to_sign = ctx.string_to_sign();
        debug!("string to sign: {}", &string_to_sign);

        let signature = sign(cred.service_key.as_bytes(), string_to_sign.as_bytes());
        ctx.authorization(&self.realm, &cred.service_id, &signature)
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred =
            credential.ok_or_else(|| Error::credential_invalid("missing mauth credential"))?;
        let principal = req.extensions.get::<DelegatedPrincipal>().cloned();

        let mut value: HeaderValue = self.build_authorization(cred, principal)?.parse()?;
        value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, value);

        Ok(())
    }
}
