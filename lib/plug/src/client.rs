//! HTTP client façade over the middleware chain.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{Level, debug, span};

use crate::{
    Error, Exchange, ExchangeSlot, Headers, HyperTransport, Method, Middleware, MiddlewareStack,
    Request, Response, Result, Transport, TransportConfig, TransportSend,
    middleware::{BearerAuth, Cache, DefaultHeaders, Logging, Retry},
};

#[cfg(feature = "middleware-basic-auth")]
use crate::middleware::BasicAuth;

/// HTTP client running every call through an ordered middleware stack.
///
/// Each call resolves the stack around the transport and hands back the
/// [`Exchange`] that reached the end of the response chain. Calls share
/// nothing but the immutable stack and the transport, so a `Client` can be
/// cloned and used from many threads at once.
///
/// # Example
///
/// ```no_run
/// use plug::{Client, Headers};
///
/// let client = Client::builder()
///     .hyper(Default::default())
///     .with_logging()
///     .with_bearer_auth("my-token")
///     .build()?;
///
/// let response = client.get("https://api.example.com/users/42", Headers::new())?;
/// println!("{}", response.status());
/// # Ok::<(), plug::Error>(())
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    stack: Arc<MiddlewareStack>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("middleware", &*self.stack)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client over [`HyperTransport`] with default configuration and
    /// no middleware.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be started.
    pub fn new() -> Result<Self> {
        Self::builder().hyper(TransportConfig::default()).build()
    }

    /// Create a client over [`HyperTransport`] with custom configuration.
    ///
    /// Default headers from the configuration are applied by an innermost
    /// [`DefaultHeaders`] middleware.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be started.
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        Self::builder().hyper(config).build()
    }

    /// Create a client from a JSON transport configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// transport cannot be started.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(TransportConfig::from_json_file(path)?)
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The registered middleware, in registration order.
    #[must_use]
    pub fn middleware(&self) -> &MiddlewareStack {
        &self.stack
    }

    /// Run `request` through the middleware chain and the transport.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a middleware or the transport, or
    /// [`Error::NoResponse`] if the chain ended without producing a response.
    pub fn execute(&self, request: Request) -> Result<Exchange> {
        let span = span!(
            Level::DEBUG,
            "plug_execute",
            method = %request.method(),
            url = %request.url()
        );
        let _entered = span.enter();

        let send = TransportSend::new(&*self.transport);
        let slot = ExchangeSlot::new();
        self.stack.resolve(&send, &slot).call(request)?;

        let exchange = slot.into_inner().ok_or(Error::NoResponse)?;
        debug!(status = exchange.response().status(), "exchange captured");
        Ok(exchange)
    }

    /// Build a request from its parts and [`Client::execute`] it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `url` does not parse, otherwise as
    /// [`Client::execute`].
    pub fn send(
        &self,
        method: Method,
        url: &str,
        headers: Headers,
        body: impl Into<Bytes>,
    ) -> Result<Exchange> {
        let request = Request::builder(method, url.parse()?)
            .headers(headers)
            .body(body)
            .build();
        self.execute(request)
    }

    /// Send a `GET` request.
    ///
    /// # Errors
    ///
    /// See [`Client::send`].
    pub fn get(&self, url: &str, headers: Headers) -> Result<Response> {
        self.verb(Method::Get, url, headers, Bytes::new())
    }

    /// Send a `HEAD` request.
    ///
    /// # Errors
    ///
    /// See [`Client::send`].
    pub fn head(&self, url: &str, headers: Headers) -> Result<Response> {
        self.verb(Method::Head, url, headers, Bytes::new())
    }

    /// Send a `POST` request.
    ///
    /// # Errors
    ///
    /// See [`Client::send`].
    pub fn post(&self, url: &str, headers: Headers, body: impl Into<Bytes>) -> Result<Response> {
        self.verb(Method::Post, url, headers, body)
    }

    /// Send a `PUT` request.
    ///
    /// # Errors
    ///
    /// See [`Client::send`].
    pub fn put(&self, url: &str, headers: Headers, body: impl Into<Bytes>) -> Result<Response> {
        self.verb(Method::Put, url, headers, body)
    }

    /// Send a `PATCH` request.
    ///
    /// # Errors
    ///
    /// See [`Client::send`].
    pub fn patch(&self, url: &str, headers: Headers, body: impl Into<Bytes>) -> Result<Response> {
        self.verb(Method::Patch, url, headers, body)
    }

    /// Send a `DELETE` request.
    ///
    /// # Errors
    ///
    /// See [`Client::send`].
    pub fn delete(&self, url: &str, headers: Headers, body: impl Into<Bytes>) -> Result<Response> {
        self.verb(Method::Delete, url, headers, body)
    }

    fn verb(
        &self,
        method: Method,
        url: &str,
        headers: Headers,
        body: impl Into<Bytes>,
    ) -> Result<Response> {
        self.send(method, url, headers, body)
            .map(Exchange::into_response)
    }
}

// ============================================================================
// Builder
// ============================================================================

#[derive(Default)]
enum TransportChoice {
    #[default]
    Unset,
    Custom(Arc<dyn Transport>),
    Hyper(TransportConfig),
}

/// Builder for [`Client`].
///
/// Middleware is kept in the order the `with*` methods are called: the
/// first one registered sees the request first and the response last.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use plug::{Client, TransportConfig};
///
/// let config = TransportConfig::builder()
///     .timeout(Duration::from_secs(5))
///     .build();
///
/// let client = Client::builder()
///     .hyper(config)
///     .with_logging()
///     .with_retry(2)
///     .build()?;
/// assert_eq!(client.middleware().len(), 2);
/// # Ok::<(), plug::Error>(())
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    transport: TransportChoice,
    stack: MiddlewareStack,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let transport = match &self.transport {
            TransportChoice::Unset => "unset",
            TransportChoice::Custom(_) => "custom",
            TransportChoice::Hyper(_) => "hyper",
        };
        f.debug_struct("ClientBuilder")
            .field("transport", &transport)
            .field("middleware", &self.stack)
            .finish()
    }
}

impl ClientBuilder {
    /// Use a custom transport.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = TransportChoice::Custom(Arc::new(transport));
        self
    }

    /// Use an already shared transport.
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = TransportChoice::Custom(transport);
        self
    }

    /// Use [`HyperTransport`] with the given configuration.
    #[must_use]
    pub fn hyper(mut self, config: TransportConfig) -> Self {
        self.transport = TransportChoice::Hyper(config);
        self
    }

    /// Append a middleware.
    #[must_use]
    pub fn with(mut self, middleware: impl Middleware + 'static) -> Self {
        self.stack.push(middleware);
        self
    }

    /// Append an already shared middleware, e.g. a [`Cache`] the caller
    /// wants to inspect.
    #[must_use]
    pub fn with_shared(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.stack.push_shared(middleware);
        self
    }

    /// Append a [`Logging`] middleware at info level.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.with(Logging::new())
    }

    /// Append a [`Logging`] middleware at debug level.
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.with(Logging::debug())
    }

    /// Append a [`BearerAuth`] middleware.
    #[must_use]
    pub fn with_bearer_auth(self, token: impl Into<String>) -> Self {
        self.with(BearerAuth::new(token))
    }

    /// Append a [`BasicAuth`] middleware.
    #[cfg(feature = "middleware-basic-auth")]
    #[must_use]
    pub fn with_basic_auth(self, username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        self.with(BasicAuth::new(username, password))
    }

    /// Append a [`DefaultHeaders`] middleware.
    #[must_use]
    pub fn with_default_headers(self, headers: Headers) -> Self {
        self.with(DefaultHeaders::new(headers))
    }

    /// Append a fresh [`Cache`] middleware.
    #[must_use]
    pub fn with_cache(self) -> Self {
        self.with(Cache::new())
    }

    /// Append a [`Retry`] middleware.
    #[must_use]
    pub fn with_retry(self, max_retries: u32) -> Self {
        self.with(Retry::new(max_retries))
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no transport was chosen, or an
    /// error if [`HyperTransport`] cannot be started.
    pub fn build(self) -> Result<Client> {
        let Self { transport, mut stack } = self;

        let transport: Arc<dyn Transport> = match transport {
            TransportChoice::Unset => {
                return Err(Error::configuration("no transport configured"));
            }
            TransportChoice::Custom(transport) => transport,
            TransportChoice::Hyper(config) => {
                if !config.default_headers.is_empty() {
                    stack.push(DefaultHeaders::new(config.default_headers.clone()));
                }
                Arc::new(HyperTransport::with_config(config)?)
            }
        };

        debug!(middleware = ?stack, "client built");
        Ok(Client {
            transport,
            stack: Arc::new(stack),
        })
    }
}
