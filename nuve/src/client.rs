use std::future::pending;
use std::time::Duration;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Response, Uri};
use log::{debug, warn};
use nuve_core::{Context, Error, OsEnv, Result, Signer};
use nuve_http_send_reqwest::ReqwestHttpSend;
use nuve_mauth::{
    Credential, DefaultCredentialProvider, DelegatedPrincipal, RequestSigner,
    StaticCredentialProvider,
};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::constants::APPLICATION_JSON;
use crate::types::Message;

/// Client sends signed requests to one Nuve host.
///
/// Cloning is cheap and clones share the credential cache. Every call signs
/// with a fresh timestamp and nonce, so a client can be used from many tasks
/// at once.
#[derive(Clone, Debug)]
pub struct Client {
    host: String,
    timeout: Option<Duration>,
    check_status: bool,
    signer: Signer<Credential>,
}

impl Client {
    /// Build a client with the default reqwest transport.
    pub fn new(config: Config) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Start a builder to customize the transport or the signer.
    pub fn builder(config: Config) -> ClientBuilder {
        ClientBuilder {
            config,
            ctx: None,
            request_signer: None,
        }
    }

    /// Base host every path is appended to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Sign and send one request, returning the raw response body.
    ///
    /// The body is returned whatever the status code unless status checking
    /// is enabled in [`Config`].
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
        principal: Option<DelegatedPrincipal>,
    ) -> Result<Bytes> {
        let resp = self.dispatch(method, path, body, principal, None).await?;
        self.into_body(resp)
    }

    /// Same as [`Client::send`] but gives up as soon as `token` is cancelled.
    ///
    /// A cancelled call fails with `ErrorKind::Transport`.
    pub async fn send_with_cancel(
        &self,
        token: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<Bytes>,
        principal: Option<DelegatedPrincipal>,
    ) -> Result<Bytes> {
        let resp = self
            .dispatch(method, path, body, principal, Some(token))
            .await?;
        self.into_body(resp)
    }

    /// Sign and send one request, returning the whole response.
    ///
    /// Status checking is never applied here.
    pub async fn send_response(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
        principal: Option<DelegatedPrincipal>,
    ) -> Result<Response<Bytes>> {
        self.dispatch(method, path, body, principal, None).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
        principal: Option<DelegatedPrincipal>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<Bytes>> {
        let uri = format!("{}{}", self.host, path);
        let mut req = http::Request::builder()
            .method(method.clone())
            .uri(&uri)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(body.unwrap_or_default())?;
        if let Some(principal) = principal {
            req.extensions_mut().insert(principal);
        }

        let call = async {
            let (mut parts, body) = req.into_parts();
            self.signer.sign(&mut parts).await?;

            debug!("sending request: {method} {uri}");
            self.signer
                .context()
                .http_send(http::Request::from_parts(parts, body))
                .await
        };
        let timer = async {
            match self.timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => pending().await,
            }
        };
        let cancelled = async {
            match cancel {
                Some(token) => token.cancelled().await,
                None => pending().await,
            }
        };

        // Losing branches are dropped here, which aborts the in-flight call.
        let resp = tokio::select! {
            biased;

            resp = call => resp?,
            _ = timer => {
                warn!("request {method} {uri} timed out after {:?}", self.timeout);
                return Err(Error::timeout(format!(
                    "{method} {uri} did not complete within {:?}",
                    self.timeout.unwrap_or_default()
                )));
            }
            _ = cancelled => {
                debug!("request {method} {uri} cancelled by caller");
                return Err(Error::transport(format!("{method} {uri} cancelled by caller")));
            }
        };

        debug!("{method} {uri}: {}", resp.status());
        Ok(resp)
    }

    fn into_body(&self, resp: Response<Bytes>) -> Result<Bytes> {
        if self.check_status {
            check_status(&resp)?;
        }
        Ok(resp.into_body())
    }
}

/// Map a non-2xx response to `ErrorKind::Status`.
///
/// Nuve usually explains failures with `{"msg": .., "code": ..}`; the raw body
/// is used when it does not.
fn check_status(resp: &Response<Bytes>) -> Result<()> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }

    let detail = match serde_json::from_slice::<Message>(resp.body()) {
        Ok(msg) if !msg.msg.is_empty() => msg.to_string(),
        _ => String::from_utf8_lossy(resp.body()).into_owned(),
    };
    Err(Error::status(format!("{status}: {detail}")))
}

/// ClientBuilder customizes how a [`Client`] talks and signs.
pub struct ClientBuilder {
    config: Config,
    ctx: Option<Context>,
    request_signer: Option<RequestSigner>,
}

impl ClientBuilder {
    /// Use this context instead of building a reqwest transport.
    pub fn context(mut self, ctx: Context) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// Use this request signer, e.g. one with a custom nonce source.
    ///
    /// The realm from [`Config`] still applies when set.
    pub fn request_signer(mut self, signer: RequestSigner) -> Self {
        self.request_signer = Some(signer);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let config = self.config;

        let host = config.host().to_string();
        let uri = host.parse::<Uri>().map_err(|e| {
            Error::config_invalid(format!("host {host} is not a valid url")).with_source(e)
        })?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(Error::config_invalid(format!(
                "host {host} must carry a scheme and an authority"
            )));
        }

        let timeout = config.timeout_duration();
        let ctx = match self.ctx {
            Some(ctx) => ctx,
            None => {
                let http = ReqwestHttpSend::builder()
                    .connect_timeout(timeout)
                    .use_env_proxy(config.use_proxy)
                    .build()?;
                Context::new().with_http_send(http).with_env(OsEnv)
            }
        };

        let mut loader = DefaultCredentialProvider::new();
        if let (Some(id), Some(key)) = (&config.service_id, &config.service_key) {
            loader = loader.push_front(StaticCredentialProvider::new(id, key));
        }

        let mut request_signer = self.request_signer.unwrap_or_default();
        if let Some(realm) = &config.realm {
            request_signer = request_signer.with_realm(realm.clone());
        }

        Ok(Client {
            host,
            timeout,
            check_status: config.check_status,
            signer: Signer::new(ctx, loader, request_signer),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use http::StatusCode;
    use nuve_core::{ErrorKind, HttpSend, StaticEnv};
    use nuve_mauth::ParsedAuthorization;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;
    use test_case::test_case;

    #[derive(Debug)]
    struct Recorded {
        method: Method,
        uri: String,
        headers: http::HeaderMap,
        body: Bytes,
    }

    /// Sets `flag` on drop unless disarmed first.
    struct DropFlag {
        flag: Arc<AtomicBool>,
        armed: bool,
    }

    impl Drop for DropFlag {
        fn drop(&mut self) {
            if self.armed {
                self.flag.store(true, Ordering::SeqCst);
            }
        }
    }

    #[derive(Debug, Clone)]
    struct MockHttpSend {
        delay: Option<Duration>,
        status: StatusCode,
        body: &'static str,
        requests: Arc<Mutex<Vec<Recorded>>>,
        dropped: Arc<AtomicBool>,
        completed: Arc<AtomicUsize>,
    }

    impl MockHttpSend {
        fn new(status: StatusCode, body: &'static str) -> Self {
            Self {
                delay: None,
                status,
                body,
                requests: Arc::default(),
                dropped: Arc::default(),
                completed: Arc::default(),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<Response<Bytes>> {
            let (parts, body) = req.into_parts();
            self.requests.lock().unwrap().push(Recorded {
                method: parts.method,
                uri: parts.uri.to_string(),
                headers: parts.headers,
                body,
            });

            let mut guard = DropFlag {
                flag: self.dropped.clone(),
                armed: true,
            };
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            guard.armed = false;
            self.completed.fetch_add(1, Ordering::SeqCst);

            Ok(Response::builder()
                .status(self.status)
                .body(Bytes::from_static(self.body.as_bytes()))?)
        }
    }

    fn client(config: Config, mock: &MockHttpSend) -> Client {
        let ctx = Context::new()
            .with_http_send(mock.clone())
            .with_env(StaticEnv {
                envs: HashMap::new(),
            });
        Client::builder(config.with_service("svc1", "secret"))
            .context(ctx)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_send_signs_and_sets_content_type() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, "[]");
        let client = client(Config::new().with_host("http://nuve:3000"), &mock);

        let body = client.send(Method::GET, "/rooms/", None, None).await?;
        assert_eq!(&body[..], b"[]");

        let requests = mock.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.uri, "http://nuve:3000/rooms/");
        assert!(req.body.is_empty());
        assert_eq!(req.headers[CONTENT_TYPE], "application/json");

        let parsed = ParsedAuthorization::parse(req.headers[http::header::AUTHORIZATION].to_str()?)?;
        assert_eq!(parsed.service_id, "svc1");
        assert!(parsed.verify(b"secret"));
        Ok(())
    }

    #[tokio::test]
    async fn test_principal_reaches_header() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, "dG9rZW4=");
        let client = client(Config::new(), &mock);

        client
            .send(
                Method::POST,
                "/rooms/r1/tokens",
                Some(Bytes::from_static(b"{}")),
                Some(DelegatedPrincipal::new("alice", "presenter")),
            )
            .await?;

        let requests = mock.requests.lock().unwrap();
        let auth = requests[0].headers[http::header::AUTHORIZATION].to_str()?;
        assert!(auth.contains(",mauth_username=YWxpY2U=,mauth_role=cHJlc2VudGVy,"));
        assert_eq!(&requests[0].body[..], b"{}");
        Ok(())
    }

    #[tokio::test]
    async fn test_non_success_is_passed_through() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::NOT_FOUND, "Room does not exist");
        let client = client(Config::new(), &mock);

        let body = client.send(Method::GET, "/rooms/nope", None, None).await?;
        assert_eq!(&body[..], b"Room does not exist");

        let resp = client
            .send_response(Method::GET, "/rooms/nope", None, None)
            .await?;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[test_case(r#"{"msg":"room not found","code":404}"#, "404 Not Found: room not found (code 404)" ; "json message")]
    #[test_case("Room does not exist", "404 Not Found: Room does not exist" ; "plain text")]
    #[tokio::test]
    async fn test_check_status(body: &'static str, expected: &'static str) {
        let mock = MockHttpSend::new(StatusCode::NOT_FOUND, body);
        let client = client(Config::new().with_check_status(true), &mock);

        let err = client
            .send(Method::GET, "/rooms/nope", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status);
        assert_eq!(err.message(), expected);
    }

    #[tokio::test]
    async fn test_timeout_cancels_in_flight_call() {
        let mock = MockHttpSend::new(StatusCode::OK, "late").with_delay(Duration::from_secs(10));
        let client = client(Config::new().with_timeout(50), &mock);

        let start = Instant::now();
        let err = client
            .send(Method::GET, "/rooms/", None, None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(start.elapsed() < Duration::from_secs(2));
        assert!(mock.dropped.load(Ordering::SeqCst));
        assert_eq!(mock.completed.load(Ordering::SeqCst), 0);
    }

    #[test_case(0 ; "zero")]
    #[test_case(-5 ; "negative")]
    #[tokio::test]
    async fn test_non_positive_timeout_waits(millis: i64) {
        let mock = MockHttpSend::new(StatusCode::OK, "slow").with_delay(Duration::from_millis(300));
        let client = client(Config::new().with_timeout(millis), &mock);

        let body = client.send(Method::GET, "/rooms/", None, None).await.unwrap();
        assert_eq!(&body[..], b"slow");
    }

    #[tokio::test]
    async fn test_fast_response_is_not_cancelled() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, "ok").with_delay(Duration::from_millis(10));
        let client = client(Config::new().with_timeout(5000), &mock);

        client.send(Method::GET, "/rooms/", None, None).await?;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!mock.dropped.load(Ordering::SeqCst));
        assert_eq!(mock.completed.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_token_aborts_call() {
        let mock = MockHttpSend::new(StatusCode::OK, "late").with_delay(Duration::from_secs(10));
        let client = client(Config::new().with_timeout(0), &mock);

        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = client
            .send_with_cancel(&token, Method::GET, "/rooms/", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(mock.dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_concurrent_calls_get_distinct_headers() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, "[]");
        let client = client(Config::new(), &mock);

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move { client.send(Method::GET, "/rooms/", None, None).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap()?;
        }

        let requests = mock.requests.lock().unwrap();
        let mut headers: Vec<_> = requests
            .iter()
            .map(|r| r.headers[http::header::AUTHORIZATION].clone())
            .collect();
        headers.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
        headers.dedup();
        assert!(headers.len() >= 15);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_sending() {
        let mock = MockHttpSend::new(StatusCode::OK, "[]");
        let ctx = Context::new()
            .with_http_send(mock.clone())
            .with_env(StaticEnv {
                envs: HashMap::new(),
            });
        let client = Client::builder(Config::new()).context(ctx).build().unwrap();

        let err = client
            .send(Method::GET, "/rooms/", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(mock.requests.lock().unwrap().is_empty());
    }

    #[test_case("not a url" ; "garbage")]
    #[test_case("/rooms" ; "path only")]
    fn test_invalid_host(host: &str) {
        let err = Client::new(Config::new().with_host(host)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
