//! Parsing and verification of MAuth headers.
//!
//! Clients never need this on the request path. It exists for mock servers,
//! diagnostics and tests that have to check what a client actually sent.

use log::debug;
use nuve_core::{Error, Result};
use subtle::ConstantTimeEq;

use crate::constants::*;
use crate::sign_request::{sign, SigningContext};
use crate::DelegatedPrincipal;

/// An `Authorization` header split back into its MAuth fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAuthorization {
    /// Announced realm.
    pub realm: String,
    /// Announced signature method, always `HMAC_SHA1` for valid headers.
    pub signature_method: String,
    /// Service id.
    pub service_id: String,
    /// Signature as sent.
    pub signature: String,
    /// Nonce, timestamp and principal as sent.
    pub context: SigningContext,
}

impl ParsedAuthorization {
    /// Parse a header value.
    ///
    /// Fields must appear in wire order; username and role must appear
    /// together or not at all.
    pub fn parse(value: &str) -> Result<Self> {
        let rest = value
            .strip_prefix(MAUTH_SCHEME)
            .and_then(|v| v.strip_prefix(' '))
            .ok_or_else(|| Error::request_invalid("authorization is not a MAuth header"))?;

        let fields = rest
            .split(',')
            .map(|kv| {
                kv.split_once('=')
                    .ok_or_else(|| Error::request_invalid(format!("malformed mauth field: {kv}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let keys: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
        let delegated = match keys.as_slice() {
            [REALM, SIGNATURE_METHOD, SERVICE_ID, CNONCE, TIMESTAMP, SIGNATURE] => false,
            [REALM, SIGNATURE_METHOD, USERNAME, ROLE, SERVICE_ID, CNONCE, TIMESTAMP, SIGNATURE] => {
                true
            }
            _ => {
                return Err(Error::request_invalid(format!(
                    "unexpected mauth field order: {keys:?}"
                )))
            }
        };

        let mut values = fields.into_iter().map(|(_, v)| v);
        let mut next = || values.next().unwrap_or_default().to_string();

        let realm = next();
        let signature_method = next();
        let principal = if delegated {
            let username = next();
            let role = next();
            Some(DelegatedPrincipal::from_encoded(username, role)?)
        } else {
            None
        };
        let service_id = next();
        let nonce: u32 = next()
            .parse()
            .map_err(|e| Error::request_invalid("invalid mauth_cnonce").with_source(e))?;
        let timestamp_millis: i64 = next()
            .parse()
            .map_err(|e| Error::request_invalid("invalid mauth_timestamp").with_source(e))?;
        let signature = next();

        Ok(Self {
            realm,
            signature_method,
            service_id,
            signature,
            context: SigningContext::new(timestamp_millis, nonce, principal),
        })
    }

    /// Recompute the signature with `key` and compare in constant time.
    pub fn verify(&self, key: &[u8]) -> bool {
        if self.signature_method != MAUTH_SIGNATURE_METHOD {
            debug!("unsupported signature method: {}", self.signature_method);
            return false;
        }

        let expected = sign(key, self.context.string_to_sign().as_bytes());
        expected.as_bytes().ct_eq(self.signature.as_bytes()).into()
    }
}
