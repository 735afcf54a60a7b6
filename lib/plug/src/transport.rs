//! Blocking HTTP transport over hyper-util.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tokio::runtime::Runtime;
use tracing::trace;

use crate::{
    Error, Headers, Method, Request, Response, Result, Transport,
    config::{HttpVersion, TransportConfig},
    connector::https_connector,
};

/// [`Transport`] backed by a pooled hyper-util client with rustls.
///
/// The transport owns a single-threaded tokio runtime and blocks the calling
/// thread on each request, so the middleware chain above it stays plain
/// synchronous code. Do not call it from inside an async task; move the call
/// to `tokio::task::spawn_blocking` instead.
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    runtime: Runtime,
    config: TransportConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be started.
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be started.
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let connector = https_connector(&config);
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .http2_only(config.http_version == Some(HttpVersion::Http2))
            .build(connector);

        Ok(Self {
            inner,
            runtime,
            config,
        })
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Build a hyper request from a plug request.
    ///
    /// `GET` and `HEAD` requests go out without a body.
    fn build_hyper_request(
        request: &Request,
        version: Option<HttpVersion>,
    ) -> Result<http::Request<Full<Bytes>>> {
        let mut builder = http::Request::builder()
            .method(http::Method::from(request.method()))
            .uri(request.url().as_str());

        builder = match version {
            Some(HttpVersion::Http10) => builder.version(http::Version::HTTP_10),
            Some(HttpVersion::Http11) => builder.version(http::Version::HTTP_11),
            Some(HttpVersion::Http2) | None => builder,
        };

        for (name, value) in request.headers().iter() {
            builder = builder.header(name, value);
        }

        builder
            .body(Full::new(Self::outgoing_body(request)))
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    fn outgoing_body(request: &Request) -> Bytes {
        match request.method() {
            Method::Get | Method::Head => Bytes::new(),
            _ => request.body().clone(),
        }
    }

    /// Collect response headers, skipping values that are not valid UTF-8.
    fn extract_headers(headers: &http::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    async fn execute(&self, request: http::Request<Full<Bytes>>) -> Result<Response> {
        let response = tokio::time::timeout(self.config.timeout, self.inner.request(request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());

        let body = tokio::time::timeout(self.config.timeout, response.into_body().collect())
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(status, headers, body))
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if Self::timed_out(&err) {
            return Error::Timeout;
        }

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }

    /// Whether an I/O timeout sits anywhere in the error's source chain.
    ///
    /// Connect timeouts surface this way, wrapped in a connect error.
    fn timed_out(err: &(dyn std::error::Error + 'static)) -> bool {
        let mut cause = Some(err);
        while let Some(current) = cause {
            if current
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io| io.kind() == std::io::ErrorKind::TimedOut)
            {
                return true;
            }
            cause = current.source();
        }
        false
    }
}

impl Transport for HyperTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        let hyper_request = Self::build_hyper_request(request, self.config.http_version)?;
        trace!(method = %request.method(), url = %request.url(), "transport sending");
        self.runtime.block_on(self.execute(hyper_request))
    }
}
