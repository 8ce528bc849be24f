use nuve_core::hash::{base64_decode, base64_encode};
use nuve_core::{Error, Result};

/// DelegatedPrincipal names the end user a request acts for.
///
/// Both fields are kept base64 encoded, exactly as they appear on the wire
/// and in the string to sign. Attach it to a request through
/// `http::Extensions` and the MAuth signer will pick it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatedPrincipal {
    username: String,
    role: String,
}

impl DelegatedPrincipal {
    /// Create a principal from raw username and role bytes.
    pub fn new(username: impl AsRef<[u8]>, role: impl AsRef<[u8]>) -> Self {
        Self {
            username: base64_encode(username.as_ref()),
            role: base64_encode(role.as_ref()),
        }
    }

    /// Create a principal from already encoded values.
    ///
    /// Both values must be standard padded base64, so they can never carry a
    /// `,` into the header or the string to sign.
    pub fn from_encoded(username: impl Into<String>, role: impl Into<String>) -> Result<Self> {
        let principal = Self {
            username: username.into(),
            role: role.into(),
        };
        principal.decode().map_err(|e| {
            Error::request_invalid("delegated principal is not base64 encoded").with_source(e)
        })?;

        Ok(principal)
    }

    /// Base64 encoded username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Base64 encoded role.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Decode username and role back to raw bytes.
    pub fn decode(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        Ok((base64_decode(&self.username)?, base64_decode(&self.role)?))
    }
}
