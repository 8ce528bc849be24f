// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Reqwest-based HTTP transport for nuve.
//!
//! `ReqwestHttpSend` implements the `HttpSend` trait from `nuve_core`. It
//! sends exactly one request, drains the whole response body into memory and
//! classifies failures:
//!
//! - connect/DNS/reset failures become `ErrorKind::Transport`
//! - reqwest's own connect timeout becomes `ErrorKind::Timeout`
//! - failures while reading a started body become `ErrorKind::ResponseBody`
//!
//! Dropping the future returned by `http_send` drops the reqwest future,
//! which aborts the in-flight request and closes its connection.
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use nuve_core::Context;
//! use nuve_http_send_reqwest::ReqwestHttpSend;
//!
//! # fn example() -> nuve_core::Result<()> {
//! let http = ReqwestHttpSend::builder()
//!     .connect_timeout(Some(Duration::from_secs(3)))
//!     .use_env_proxy(false)
//!     .build()?;
//! let ctx = Context::new().with_http_send(http);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use nuve_core::{Error, HttpSend, Result};
use reqwest::{Client, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Start building a client from transport options.
    pub fn builder() -> ReqwestHttpSendBuilder {
        ReqwestHttpSendBuilder::default()
    }
}

/// Builder for [`ReqwestHttpSend`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpSendBuilder {
    connect_timeout: Option<Duration>,
    use_env_proxy: bool,
}

impl ReqwestHttpSendBuilder {
    /// Bound the connect phase. `None` keeps reqwest's defaults.
    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    pub fn use_env_proxy(mut self, enabled: bool) -> Self {
        self.use_env_proxy = enabled;
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<ReqwestHttpSend> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if !self.use_env_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| Error::config_invalid("failed to build http client").with_source(e))?;
        Ok(ReqwestHttpSend::new(client))
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(classify_send_error)?
            .into();

        debug!("got response status: {}", resp.status());

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::response_body("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

fn classify_send_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::timeout("connect timed out").with_source(err)
    } else {
        Error::transport("failed to send request").with_source(err)
    }
}
