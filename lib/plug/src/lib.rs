//! HTTP client that runs every exchange through an ordered middleware chain.
//!
//! Middleware see each request on the way out, in registration order, and
//! each response on the way back, in reverse. The pair that comes out of the
//! chain is handed back to the caller as an [`Exchange`].
//!
//! # Example
//!
//! ```no_run
//! use plug::{Client, Headers};
//!
//! let client = Client::builder()
//!     .hyper(Default::default())
//!     .with_logging()
//!     .with_retry(2)
//!     .with_bearer_auth("my-token")
//!     .build()?;
//!
//! let response = client.get("https://api.example.com/users/42", Headers::new())?;
//! println!("{}", response.status());
//! # Ok::<(), plug::Error>(())
//! ```
//!
//! See the [tutorial][_tutorial] for a complete guide.

pub mod _tutorial;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod transport;

// Re-export client types
pub use client::{Client, ClientBuilder};
pub use config::{HttpVersion, TransportConfig, TransportConfigBuilder};
pub use transport::HyperTransport;

// Re-export core types
pub use plug_core::{
    Attempt, ContentType, Error, Exchange, ExchangeSlot, Headers, Method, Middleware,
    MiddlewareStack, Pipeline, PipelineBuilder, Request, RequestBuilder, RequestNext, Response,
    ResponseNext, Result, StatusCode, TerminalReceive, TerminalSend, Transport, TransportSend,
    from_json, to_form, to_json,
};

// Re-export url for building requests by hand
pub use url::{self, Url};
