use std::fmt::{Debug, Formatter};
use std::time::Duration;

use log::warn;
use nuve_core::utils::Redact;
use nuve_core::Context;
use nuve_mauth::{NUVE_SERVICE_ID, NUVE_SERVICE_KEY};

use crate::constants::*;

/// Config carries everything needed to build a [`Client`](crate::Client).
///
/// It is read once at construction; the client never mutates it.
#[derive(Clone, Default)]
pub struct Config {
    /// Base url every request path is appended to, e.g. `http://localhost:3000`.
    ///
    /// Loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NUVE_HOST`]
    /// - `http://localhost:3000` otherwise
    pub host: Option<String>,
    /// Wall clock bound of one request in milliseconds.
    ///
    /// A value `<= 0` disables the bound. Loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NUVE_TIMEOUT`]
    /// - 3000 otherwise
    pub timeout: Option<i64>,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    ///
    /// Set by env value [`NUVE_PROXY`] when it is `true` or `1`.
    pub use_proxy: bool,
    /// Service id used in `mauth_serviceid`.
    ///
    /// - this field if it's `is_some`
    /// - env value: `NUVE_SERVICE_ID`
    pub service_id: Option<String>,
    /// Shared key of the service.
    ///
    /// - this field if it's `is_some`
    /// - env value: `NUVE_SERVICE_KEY`
    pub service_key: Option<String>,
    /// Realm announced in the MAuth header, defaults to the Nuve realm.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NUVE_REALM`]
    pub realm: Option<String>,
    /// Turn non-2xx responses into `ErrorKind::Status` errors.
    ///
    /// Off by default: responses are handed back verbatim whatever their status.
    pub check_status: bool,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set timeout in milliseconds
    pub fn with_timeout(mut self, millis: i64) -> Self {
        self.timeout = Some(millis);
        self
    }

    /// Set use_proxy
    pub fn with_proxy(mut self, use_proxy: bool) -> Self {
        self.use_proxy = use_proxy;
        self
    }

    /// Set service_id and service_key
    pub fn with_service(
        mut self,
        service_id: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        self.service_id = Some(service_id.into());
        self.service_key = Some(service_key.into());
        self
    }

    /// Set realm
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Set check_status
    pub fn with_check_status(mut self, check_status: bool) -> Self {
        self.check_status = check_status;
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(NUVE_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NUVE_TIMEOUT) {
            match v.trim().parse::<i64>() {
                Ok(millis) => {
                    self.timeout.get_or_insert(millis);
                }
                Err(_) => warn!("ignore invalid {NUVE_TIMEOUT}: {v}"),
            }
        }
        if let Some(v) = ctx.env_var(NUVE_PROXY) {
            self.use_proxy |= matches!(v.trim(), "1" | "true" | "TRUE" | "on");
        }
        if let Some(v) = ctx.env_var(NUVE_SERVICE_ID) {
            self.service_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NUVE_SERVICE_KEY) {
            self.service_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NUVE_REALM) {
            self.realm.get_or_insert(v);
        }

        self
    }

    /// Resolved base host.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Resolved timeout, `None` when requests are unbounded.
    pub fn timeout_duration(&self) -> Option<Duration> {
        match self.timeout.unwrap_or(DEFAULT_TIMEOUT_MILLIS) {
            millis if millis > 0 => Some(Duration::from_millis(millis as u64)),
            _ => None,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("timeout", &self.timeout)
            .field("use_proxy", &self.use_proxy)
            .field("service_id", &self.service_id)
            .field("service_key", &self.service_key.as_ref().map(Redact::from))
            .field("realm", &self.realm)
            .field("check_status", &self.check_status)
            .finish()
    }
}
