//! # Chapter 2: Writing Middleware
//!
//! A middleware implements [`Middleware`](crate::Middleware). Both hooks
//! have default implementations that just continue the chain, so override
//! only what you need.
//!
//! ## A Request Hook
//!
//! ```
//! use plug::{Middleware, Request, RequestNext, Result};
//!
//! struct RequestId;
//!
//! impl Middleware for RequestId {
//!     fn name(&self) -> &str {
//!         "request-id"
//!     }
//!
//!     fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
//!         next.run(request.with_header("X-Request-Id", "42"))
//!     }
//! }
//! ```
//!
//! Requests are immutable: `with_header` returns a modified copy.
//!
//! ## A Response Hook
//!
//! ```
//! use plug::{Middleware, Request, Response, ResponseNext, Result};
//!
//! struct Served;
//!
//! impl Middleware for Served {
//!     fn on_response(&self, request: Request, response: Response, next: ResponseNext<'_>) -> Result<()> {
//!         next.run(request, response.with_added_header("X-Served-By", "plug"))
//!     }
//! }
//! ```
//!
//! ## Ordering
//!
//! Request hooks run in registration order and response hooks in reverse.
//! With `.with(a).with(b)`, `a` sees the request first and the response last.
//!
//! ## Stopping the Chain
//!
//! Not calling `next` ends the call without a response and the client
//! reports [`Error::NoResponse`](crate::Error::NoResponse). To answer without
//! the transport, use
//! [`RequestNext::short_circuit`](crate::RequestNext::short_circuit), as
//! [`Cache`](crate::middleware::Cache) does. Returning `Err` aborts the call
//! with that error:
//!
//! ```
//! use plug::{Error, Middleware, Request, RequestNext, Result};
//!
//! struct HttpsOnly;
//!
//! impl Middleware for HttpsOnly {
//!     fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
//!         if request.url().scheme() != "https" {
//!             return Err(Error::middleware("https-only", "plain HTTP refused"));
//!         }
//!         next.run(request)
//!     }
//! }
//! ```
//!
//! ## Built-in Middleware
//!
//! ```no_run
//! use plug::Client;
//!
//! let client = Client::builder()
//!     .hyper(Default::default())
//!     .with_logging()
//!     .with_retry(3)
//!     .with_cache()
//!     .with_bearer_auth("my-token")
//!     .build()?;
//! # Ok::<(), plug::Error>(())
//! ```
//!
//! See [`middleware`](crate::middleware) for the full list.
//!
//! ## Next Steps
//!
//! Continue to [Chapter 3: Configuration][super::chapter_3].
